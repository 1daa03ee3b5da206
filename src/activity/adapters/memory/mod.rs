//! In-memory adapters for the activity context.

mod directory;
mod store;

pub use directory::InMemoryActorDirectory;
pub use store::InMemoryActivityStore;
