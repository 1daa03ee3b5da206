//! Authorization checks for Tessera.
//!
//! The permission gate answers whether a user may read or mutate a board
//! (membership), perform owner-only operations (role), or be invited to a
//! board (accepted friendship). Services consult the gate before touching
//! any state. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The gate and membership service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
