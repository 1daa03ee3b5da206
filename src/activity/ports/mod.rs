//! Port contracts for the activity context.

mod directory;
mod store;

pub use directory::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
pub use store::{ActivityStore, ActivityStoreError, ActivityStoreResult};
