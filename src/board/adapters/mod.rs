//! Persistence adapters for the board module.
//!
//! Concrete implementations of the [`BoardRepository`] port:
//!
//! - [`memory::InMemoryBoardStore`]: thread-safe in-memory storage for unit
//!   testing
//! - [`postgres::PostgresBoardRepository`]: production `PostgreSQL`
//!   persistence using Diesel
//!
//! [`BoardRepository`]: crate::board::ports::BoardRepository

pub mod memory;
pub mod postgres;
