//! In-memory adapters for the board context.

mod store;

pub use store::InMemoryBoardStore;
