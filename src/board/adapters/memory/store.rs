//! In-memory board store for tests and examples.
//!
//! Compound operations hold the state write lock end-to-end, which is a
//! stricter serialization than the port demands (it serializes unrelated
//! scopes too) but keeps every committed state dense.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::board::domain::{
    BoardId, Column, ColumnId, ColumnName, Comment, CommentId, Task, TaskChanges, TaskId, UserId,
    ordering::{self, Slot},
};
use crate::board::ports::{
    AssigneeDiff, BoardRepository, BoardRepositoryError, BoardRepositoryResult, ColumnMove,
    NewComment, NewTask, TaskMove,
};

/// Thread-safe in-memory board repository.
#[derive(Clone)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<BoardState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct BoardState {
    boards: HashMap<BoardId, String>,
    columns: BTreeMap<ColumnId, Column>,
    tasks: BTreeMap<TaskId, Task>,
    comments: BTreeMap<CommentId, Comment>,
    assignees: HashMap<TaskId, Vec<UserId>>,
    next_board: i64,
    next_column: i64,
    next_task: i64,
    next_comment: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn column_slots(state: &BoardState, board_id: BoardId) -> Vec<Slot<ColumnId>> {
    state
        .columns
        .values()
        .filter(|column| column.board_id == board_id)
        .map(|column| Slot::new(column.id, column.position))
        .collect()
}

fn task_slots(state: &BoardState, column_id: ColumnId) -> Vec<Slot<TaskId>> {
    state
        .tasks
        .values()
        .filter(|task| task.column_id == column_id)
        .map(|task| Slot::new(task.id, task.position))
        .collect()
}

fn apply_column_positions(state: &mut BoardState, assignments: &[Slot<ColumnId>]) {
    for slot in assignments {
        if let Some(column) = state.columns.get_mut(&slot.id) {
            column.position = slot.position;
        }
    }
}

fn apply_task_positions(state: &mut BoardState, assignments: &[Slot<TaskId>]) {
    for slot in assignments {
        if let Some(task) = state.tasks.get_mut(&slot.id) {
            task.position = slot.position;
        }
    }
}

impl InMemoryBoardStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BoardState::default())),
            clock,
        }
    }

    fn write(&self) -> BoardRepositoryResult<std::sync::RwLockWriteGuard<'_, BoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(&self) -> BoardRepositoryResult<std::sync::RwLockReadGuard<'_, BoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Registers a board. Boards are created outside this core; the store
    /// only needs them to exist for scope checks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn create_board(&self, name: impl Into<String>) -> BoardRepositoryResult<BoardId> {
        let mut state = self.write()?;
        let board_id = BoardId::new(next_id(&mut state.next_board));
        state.boards.insert(board_id, name.into());
        Ok(board_id)
    }
}

impl Default for InMemoryBoardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardStore {
    async fn board_exists(&self, board_id: BoardId) -> BoardRepositoryResult<bool> {
        Ok(self.read()?.boards.contains_key(&board_id))
    }

    async fn find_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        Ok(self.read()?.columns.get(&column_id).cloned())
    }

    async fn find_task(&self, task_id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&task_id).cloned())
    }

    async fn columns_of_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        let mut columns: Vec<Column> = state
            .columns
            .values()
            .filter(|column| column.board_id == board_id)
            .cloned()
            .collect();
        columns.sort_by_key(|column| (column.position, column.id));
        Ok(columns)
    }

    async fn tasks_of_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.column_id == column_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.position, task.id));
        Ok(tasks)
    }

    async fn create_column(
        &self,
        board_id: BoardId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column> {
        let mut state = self.write()?;
        if !state.boards.contains_key(&board_id) {
            return Err(BoardRepositoryError::BoardNotFound(board_id));
        }
        let position = i32::try_from(column_slots(&state, board_id).len()).unwrap_or(i32::MAX);
        let column = Column {
            id: ColumnId::new(next_id(&mut state.next_column)),
            board_id,
            name: name.clone(),
            position,
            created_at: self.clock.utc(),
        };
        state.columns.insert(column.id, column.clone());
        Ok(column)
    }

    async fn rename_column(
        &self,
        column_id: ColumnId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column> {
        let mut state = self.write()?;
        let column = state
            .columns
            .get_mut(&column_id)
            .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
        column.name = name.clone();
        Ok(column.clone())
    }

    async fn move_column(
        &self,
        column_id: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<ColumnMove> {
        let mut state = self.write()?;
        let column = state
            .columns
            .get(&column_id)
            .cloned()
            .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
        let from = column.position;

        let slots = column_slots(&state, column.board_id);
        let assignments = ordering::inserted_at(&slots, column_id, requested);
        apply_column_positions(&mut state, &assignments);
        // Defensive re-pass; a no-op when the insert left the scope dense.
        let repair = ordering::normalized(&column_slots(&state, column.board_id));
        apply_column_positions(&mut state, &repair);

        let moved = state
            .columns
            .get(&column_id)
            .cloned()
            .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
        Ok(ColumnMove {
            from,
            to: moved.position,
            column: moved,
        })
    }

    async fn delete_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Column> {
        let mut state = self.write()?;
        let column = state
            .columns
            .remove(&column_id)
            .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;

        let orphaned: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.column_id == column_id)
            .map(|task| task.id)
            .collect();
        for task_id in &orphaned {
            state.tasks.remove(task_id);
            state.assignees.remove(task_id);
            state.comments.retain(|_, comment| comment.task_id != *task_id);
        }

        let repair = ordering::normalized(&column_slots(&state, column.board_id));
        apply_column_positions(&mut state, &repair);
        Ok(column)
    }

    async fn create_task(&self, new_task: NewTask) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&new_task.column_id) {
            return Err(BoardRepositoryError::ColumnNotFound(new_task.column_id));
        }
        let position =
            i32::try_from(task_slots(&state, new_task.column_id).len()).unwrap_or(i32::MAX);
        let now = self.clock.utc();
        let task = Task {
            id: TaskId::new(next_id(&mut state.next_task)),
            column_id: new_task.column_id,
            title: new_task.title,
            description: None,
            due_date: None,
            done: false,
            position,
            created_by: new_task.created_by,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        let now = self.clock.utc();
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        if let Some(done) = changes.done {
            task.done = done;
        }
        task.updated_at = now;
        Ok(task.clone())
    }

    async fn move_task(
        &self,
        task_id: TaskId,
        to_column: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<TaskMove> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
        let from_column = state
            .columns
            .get(&task.column_id)
            .cloned()
            .ok_or(BoardRepositoryError::ColumnNotFound(task.column_id))?;
        let destination = state
            .columns
            .get(&to_column)
            .cloned()
            .ok_or(BoardRepositoryError::ColumnNotFound(to_column))?;
        if from_column.board_id != destination.board_id {
            return Err(BoardRepositoryError::CrossBoardMove {
                task: task_id,
                from_board: from_column.board_id,
                to_board: destination.board_id,
            });
        }

        let now = self.clock.utc();
        if let Some(row) = state.tasks.get_mut(&task_id) {
            row.column_id = to_column;
            row.updated_at = now;
        }

        let dest_slots = task_slots(&state, to_column);
        let assignments = ordering::inserted_at(&dest_slots, task_id, requested);
        apply_task_positions(&mut state, &assignments);

        // Close the gap in the source scope, then re-pass the destination.
        let source_repair = ordering::normalized(&task_slots(&state, from_column.id));
        apply_task_positions(&mut state, &source_repair);
        let dest_repair = ordering::normalized(&task_slots(&state, to_column));
        apply_task_positions(&mut state, &dest_repair);

        let moved = state
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
        Ok(TaskMove {
            task: moved,
            from_column,
            to_column: destination,
        })
    }

    async fn delete_task(&self, task_id: TaskId) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .remove(&task_id)
            .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
        state.assignees.remove(&task_id);
        state.comments.retain(|_, comment| comment.task_id != task_id);

        let repair = ordering::normalized(&task_slots(&state, task.column_id));
        apply_task_positions(&mut state, &repair);
        Ok(task)
    }

    async fn assignees_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<UserId>> {
        Ok(self
            .read()?
            .assignees
            .get(&task_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_assignees(
        &self,
        task_id: TaskId,
        user_ids: Vec<UserId>,
    ) -> BoardRepositoryResult<AssigneeDiff> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task_id) {
            return Err(BoardRepositoryError::TaskNotFound(task_id));
        }
        let previous = state.assignees.get(&task_id).cloned().unwrap_or_default();
        let added = user_ids
            .iter()
            .filter(|user_id| !previous.contains(user_id))
            .copied()
            .collect();
        let removed = previous
            .iter()
            .filter(|user_id| !user_ids.contains(user_id))
            .copied()
            .collect();
        if user_ids.is_empty() {
            state.assignees.remove(&task_id);
        } else {
            state.assignees.insert(task_id, user_ids);
        }
        Ok(AssigneeDiff { added, removed })
    }

    async fn add_comment(&self, new_comment: NewComment) -> BoardRepositoryResult<Comment> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&new_comment.task_id) {
            return Err(BoardRepositoryError::TaskNotFound(new_comment.task_id));
        }
        let comment = Comment {
            id: CommentId::new(next_id(&mut state.next_comment)),
            task_id: new_comment.task_id,
            author_id: new_comment.author_id,
            body: new_comment.body,
            created_at: self.clock.utc(),
            deleted_at: None,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn comments_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<Comment>> {
        let state = self.read()?;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.task_id == task_id && !comment.is_deleted())
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(comments)
    }

    async fn tombstone_comment(&self, comment_id: CommentId) -> BoardRepositoryResult<Comment> {
        let mut state = self.write()?;
        let now = self.clock.utc();
        let comment = state
            .comments
            .get_mut(&comment_id)
            .ok_or(BoardRepositoryError::CommentNotFound(comment_id))?;
        if comment.deleted_at.is_none() {
            comment.deleted_at = Some(now);
        }
        Ok(comment.clone())
    }
}
