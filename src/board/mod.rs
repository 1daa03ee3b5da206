//! Board, column, and task management for Tessera.
//!
//! This module owns the position-ordered structure of a board: columns
//! within a board and tasks within a column each form a sibling scope whose
//! stored positions stay dense (`0..N-1`) through every create, move, and
//! delete. The module follows hexagonal architecture:
//!
//! - Domain types and the pure ordering engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
