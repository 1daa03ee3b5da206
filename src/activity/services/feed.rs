//! Read-side activity feeds with actor enrichment.

use crate::activity::domain::{ActivityEntry, ActorIdentity, Page};
use crate::activity::ports::{
    ActivityStore, ActivityStoreError, ActorDirectory, ActorDirectoryError,
};
use crate::board::domain::{BoardId, TaskId};
use std::sync::Arc;
use thiserror::Error;

/// An activity entry paired with its actor's resolved identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    /// The log entry.
    pub entry: ActivityEntry,
    /// The actor's public identity; `None` when the account is gone.
    pub actor: Option<ActorIdentity>,
}

/// Errors returned by feed reads.
#[derive(Debug, Clone, Error)]
pub enum ActivityFeedError {
    /// Entry lookup failed.
    #[error(transparent)]
    Store(#[from] ActivityStoreError),

    /// Actor identity lookup failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),
}

/// Result type for feed reads.
pub type ActivityFeedResult<T> = Result<T, ActivityFeedError>;

/// Paginated activity feeds for boards and tasks.
///
/// Actor identities join in at read time so historical entries always show
/// the actor's current display data.
#[derive(Clone)]
pub struct ActivityFeed<S, D>
where
    S: ActivityStore,
    D: ActorDirectory,
{
    store: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> ActivityFeed<S, D>
where
    S: ActivityStore,
    D: ActorDirectory,
{
    /// Creates a feed over the given store and directory.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>) -> Self {
        Self { store, directory }
    }

    /// Returns the board's entries newest-first, enriched with actor
    /// identities.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityFeedError`] when the store or directory fails.
    pub async fn for_board(
        &self,
        board_id: BoardId,
        page: Page,
    ) -> ActivityFeedResult<Vec<ActivityView>> {
        let entries = self.store.for_board(board_id, page).await?;
        self.enrich(entries).await
    }

    /// Returns the task's entries newest-first, enriched with actor
    /// identities. Matches both task-primary entries and entries that
    /// reference the task inside their payload.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityFeedError`] when the store or directory fails.
    pub async fn for_task(
        &self,
        task_id: TaskId,
        page: Page,
    ) -> ActivityFeedResult<Vec<ActivityView>> {
        let entries = self.store.for_task(task_id, page).await?;
        self.enrich(entries).await
    }

    async fn enrich(&self, entries: Vec<ActivityEntry>) -> ActivityFeedResult<Vec<ActivityView>> {
        let mut views = Vec::with_capacity(entries.len());
        for entry in entries {
            let actor = self.directory.resolve(entry.actor).await?;
            views.push(ActivityView { entry, actor });
        }
        Ok(views)
    }
}
