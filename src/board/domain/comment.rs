//! Task comments and the deletion-policy capability flag.

use super::{CommentBody, CommentId, DeletionPolicy, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Comment author.
    pub author_id: UserId,
    /// Comment text.
    pub body: CommentBody,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Tombstone timestamp; a `Some` value hides the comment from reads.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Comments tombstone rather than disappear, unlike columns and tasks.
    pub const DELETION: DeletionPolicy = DeletionPolicy::Tombstone;

    /// Returns `true` when the comment has been tombstoned.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
