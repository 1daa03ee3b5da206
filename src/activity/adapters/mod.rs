//! Persistence adapters for the activity module.
//!
//! Concrete implementations of the [`ActivityStore`] and [`ActorDirectory`]
//! ports:
//!
//! - [`memory::InMemoryActivityStore`] and [`memory::InMemoryActorDirectory`]:
//!   thread-safe in-memory storage for unit testing
//! - [`postgres::PostgresActivityStore`] and
//!   [`postgres::PostgresActorDirectory`]: production `PostgreSQL`
//!   persistence using Diesel
//!
//! [`ActivityStore`]: crate::activity::ports::ActivityStore
//! [`ActorDirectory`]: crate::activity::ports::ActorDirectory

pub mod memory;
pub mod postgres;
