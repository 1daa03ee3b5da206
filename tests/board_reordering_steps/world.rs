//! Shared world state for board reordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tessera::access::adapters::memory::{InMemoryFriendshipStore, InMemoryMembershipStore};
use tessera::access::services::PermissionGate;
use tessera::activity::adapters::memory::{InMemoryActivityStore, InMemoryActorDirectory};
use tessera::activity::services::ActivityRecorder;
use tessera::board::adapters::memory::InMemoryBoardStore;
use tessera::board::domain::{BoardId, ColumnId, TaskId, UserId};
use tessera::board::services::{BoardServiceError, ColumnService, TaskService};

/// Column service type used by the BDD world.
pub type TestColumnService = ColumnService<
    InMemoryBoardStore,
    InMemoryMembershipStore,
    InMemoryFriendshipStore,
    InMemoryActivityStore,
    DefaultClock,
>;

/// Task service type used by the BDD world.
pub type TestTaskService = TaskService<
    InMemoryBoardStore,
    InMemoryMembershipStore,
    InMemoryFriendshipStore,
    InMemoryActivityStore,
    InMemoryActorDirectory,
    DefaultClock,
>;

/// Scenario world for board reordering behaviour tests.
pub struct BoardWorld {
    /// Store under the services, kept for direct seeding.
    pub repository: Arc<InMemoryBoardStore>,
    /// Membership store, kept for seeding the acting user.
    pub memberships: Arc<InMemoryMembershipStore>,
    /// Activity store, kept for log assertions.
    pub activity: Arc<InMemoryActivityStore>,
    /// Column service under test.
    pub columns: TestColumnService,
    /// Task service under test.
    pub tasks: TestTaskService,
    /// The acting user; seeded as board owner.
    pub actor: UserId,
    /// The board scenarios act on; created lazily by the background step.
    pub board_id: Option<BoardId>,
    /// Columns created by the scenario, by name.
    pub column_ids: HashMap<String, ColumnId>,
    /// Tasks created by the scenario, by title.
    pub task_ids: HashMap<String, TaskId>,
    /// Result of the last move attempt.
    pub last_move_result: Option<Result<(), BoardServiceError>>,
}

impl BoardWorld {
    /// Creates a world with empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryBoardStore::new());
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let friendships = Arc::new(InMemoryFriendshipStore::new());
        let activity = Arc::new(InMemoryActivityStore::new());
        let directory = Arc::new(InMemoryActorDirectory::new());

        let gate = PermissionGate::new(Arc::clone(&memberships), friendships);
        let recorder = ActivityRecorder::new(Arc::clone(&activity), Arc::new(DefaultClock));
        let columns = ColumnService::new(Arc::clone(&repository), gate.clone(), recorder.clone());
        let tasks = TaskService::new(Arc::clone(&repository), gate, recorder, directory);

        Self {
            repository,
            memberships,
            activity,
            columns,
            tasks,
            actor: UserId::new(1),
            board_id: None,
            column_ids: HashMap::new(),
            task_ids: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Returns the scenario board, failing clearly when the background has
    /// not run.
    pub fn board(&self) -> Result<BoardId, eyre::Report> {
        self.board_id
            .ok_or_else(|| eyre::eyre!("no board in scenario world"))
    }

    /// Looks up a column created earlier in the scenario.
    pub fn column(&self, name: &str) -> Result<ColumnId, eyre::Report> {
        self.column_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown column '{name}' in scenario world"))
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task '{title}' in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a quoted comma-separated list into trimmed names.
pub fn name_list(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}
