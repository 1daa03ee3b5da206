//! `PostgreSQL` adapters for activity log persistence and actor lookup.

mod directory;
mod models;
mod schema;
mod store;

pub use directory::PostgresActorDirectory;
pub use store::{ActivityPgPool, PostgresActivityStore};
