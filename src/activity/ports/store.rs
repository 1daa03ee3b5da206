//! Append-only store port for activity log entries.

use crate::activity::domain::{ActivityEntry, NewActivityEntry, Page};
use crate::board::domain::{BoardId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity store operations.
pub type ActivityStoreResult<T> = Result<T, ActivityStoreError>;

/// Activity log persistence contract.
///
/// The log is append-only: implementations never update or delete entries.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Persists an entry, assigning its identifier.
    async fn append(&self, entry: NewActivityEntry) -> ActivityStoreResult<ActivityEntry>;

    /// Returns the board's entries newest-first within the page window.
    async fn for_board(&self, board_id: BoardId, page: Page)
    -> ActivityStoreResult<Vec<ActivityEntry>>;

    /// Returns entries describing the task, newest-first.
    ///
    /// Matches entries whose primary entity is the task, plus entries
    /// (comments, assignee changes) that reference the task inside their
    /// payload; the two conditions combine with logical OR.
    async fn for_task(&self, task_id: TaskId, page: Page)
    -> ActivityStoreResult<Vec<ActivityEntry>>;
}

/// Errors returned by activity store implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
