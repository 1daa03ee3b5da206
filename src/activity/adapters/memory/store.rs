//! In-memory activity log store for tests and examples.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::activity::domain::{ActivityEntry, ActivityId, EntityKind, NewActivityEntry, Page};
use crate::activity::ports::{ActivityStore, ActivityStoreError, ActivityStoreResult};
use crate::board::domain::{BoardId, TaskId};

/// Thread-safe in-memory activity store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityStore {
    state: Arc<RwLock<ActivityState>>,
}

#[derive(Debug, Default)]
struct ActivityState {
    entries: Vec<ActivityEntry>,
    next_id: i64,
}

impl InMemoryActivityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry in append order, for test assertions.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn all_entries(&self) -> ActivityStoreResult<Vec<ActivityEntry>> {
        Ok(self.read()?.entries.clone())
    }

    fn read(&self) -> ActivityStoreResult<std::sync::RwLockReadGuard<'_, ActivityState>> {
        self.state.read().map_err(|err| {
            ActivityStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn paginate(mut entries: Vec<ActivityEntry>, page: Page) -> Vec<ActivityEntry> {
    // Newest first; entry id breaks created-at ties deterministically.
    entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    let offset = usize::try_from(page.offset()).unwrap_or(0);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    entries.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn append(&self, entry: NewActivityEntry) -> ActivityStoreResult<ActivityEntry> {
        let mut state = self.state.write().map_err(|err| {
            ActivityStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.next_id += 1;
        let stored = ActivityEntry {
            id: ActivityId::new(state.next_id),
            actor: entry.actor,
            board_id: entry.board_id,
            entity: entry.entity,
            payload: entry.payload,
            ip: entry.ip,
            user_agent: entry.user_agent,
            created_at: entry.created_at,
        };
        state.entries.push(stored.clone());
        Ok(stored)
    }

    async fn for_board(
        &self,
        board_id: BoardId,
        page: Page,
    ) -> ActivityStoreResult<Vec<ActivityEntry>> {
        let matching = self
            .read()?
            .entries
            .iter()
            .filter(|entry| entry.board_id == Some(board_id))
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn for_task(
        &self,
        task_id: TaskId,
        page: Page,
    ) -> ActivityStoreResult<Vec<ActivityEntry>> {
        let matching = self
            .read()?
            .entries
            .iter()
            .filter(|entry| {
                let primary =
                    entry.entity.kind == EntityKind::Task && entry.entity.id == task_id.value();
                primary || entry.payload.task_id() == Some(task_id)
            })
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }
}
