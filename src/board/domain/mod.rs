//! Domain types for the board context.
//!
//! Entity types carry validated scalars from [`ids`]; the pure position
//! ordering engine lives in [`ordering`].

mod column;
mod comment;
mod error;
mod ids;
pub mod ordering;
mod task;

pub use column::Column;
pub use comment::Comment;
pub use error::BoardDomainError;
pub use ids::{
    BoardId, ColumnId, ColumnName, CommentBody, CommentId, TaskDescription, TaskId, TaskTitle,
    UserId,
};
pub use task::{Task, TaskChanges, TaskField, TaskSnapshot, changed_fields};

use serde::{Deserialize, Serialize};

/// How an entity kind leaves the system.
///
/// The legacy store is split: comments keep a tombstone timestamp while
/// columns and tasks are removed outright. Each entity type declares its
/// policy as an associated constant instead of assuming one lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionPolicy {
    /// Rows are removed; ordering scopes renumber in the same unit of work.
    Hard,
    /// Rows persist with a `deleted_at` tombstone and are filtered on read.
    Tombstone,
}
