//! Append-only activity logging for Tessera.
//!
//! Every mutating operation records one structured entry describing who did
//! what, to which entity, from where. Recording is strictly best effort: a
//! failed log write is reported through structured logging and never fails
//! the mutation it describes. The module follows hexagonal architecture:
//!
//! - Domain types and typed payloads in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The recorder and read-side feed in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
