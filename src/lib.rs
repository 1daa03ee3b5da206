//! Tessera: collaborative kanban board core.
//!
//! This crate provides the ordering, coordination, auditing, and
//! authorization machinery behind a shared kanban board: densely ordered
//! columns and tasks, atomic cross-column moves, an append-only activity
//! log, and membership-based permission checks.
//!
//! # Architecture
//!
//! Tessera follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Boards, ordered columns and tasks, and the move coordinator
//! - [`activity`]: Append-only activity log and its read-side feed
//! - [`access`]: Membership, friendship, and the permission gate

pub mod access;
pub mod activity;
pub mod board;
