//! Repository port for board, column, and task persistence.
//!
//! Every compound operation here is atomic in every implementation: either
//! all of its row writes (entity mutation plus renumbering of the affected
//! sibling scopes) become visible together, or none do. The dense-position
//! invariant therefore holds for any committed state an implementation
//! exposes.

use crate::board::domain::{
    BoardId, Column, ColumnId, ColumnName, Comment, CommentBody, CommentId, Task, TaskChanges,
    TaskId, TaskTitle, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Attributes for a task to be appended to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Parent column.
    pub column_id: ColumnId,
    /// Task title.
    pub title: TaskTitle,
    /// Creating user.
    pub created_by: UserId,
}

/// Attributes for a comment to be appended to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Parent task.
    pub task_id: TaskId,
    /// Comment author.
    pub author_id: UserId,
    /// Comment text.
    pub body: CommentBody,
}

/// Outcome of a column reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMove {
    /// The column with its committed position.
    pub column: Column,
    /// Position before the move.
    pub from: i32,
    /// Position after the move.
    pub to: i32,
}

/// Outcome of a task move or same-column reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    /// The task with its committed column and position.
    pub task: Task,
    /// Column the task left.
    pub from_column: Column,
    /// Column the task landed in.
    pub to_column: Column,
}

/// Assignee set difference produced by [`BoardRepository::replace_assignees`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeDiff {
    /// Users newly assigned.
    pub added: Vec<UserId>,
    /// Users no longer assigned.
    pub removed: Vec<UserId>,
}

/// Board, column, and task persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns `true` when the board exists.
    async fn board_exists(&self, board_id: BoardId) -> BoardRepositoryResult<bool>;

    /// Finds a column by identifier; `None` when absent.
    async fn find_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Finds a task by identifier; `None` when absent.
    async fn find_task(&self, task_id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns the board's columns ordered by `(position, id)`.
    async fn columns_of_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>>;

    /// Returns the column's tasks ordered by `(position, id)`.
    async fn tasks_of_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Appends a column at the end of the board's column scope.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does
    /// not exist.
    async fn create_column(
        &self,
        board_id: BoardId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column>;

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn rename_column(
        &self,
        column_id: ColumnId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column>;

    /// Relocates a column within its board to the clamped requested position
    /// and renumbers the board scope, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn move_column(
        &self,
        column_id: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<ColumnMove>;

    /// Deletes a column together with its tasks, then renumbers the board's
    /// remaining columns, atomically. Returns the deleted column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn delete_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Column>;

    /// Appends a task at the end of its column's task scope.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the parent
    /// column does not exist.
    async fn create_task(&self, new_task: NewTask) -> BoardRepositoryResult<Task>;

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(
        &self,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> BoardRepositoryResult<Task>;

    /// Moves a task to the destination column at the clamped requested
    /// position, renumbering both the source and destination scopes,
    /// atomically. The destination may equal the source column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] or
    /// [`BoardRepositoryError::ColumnNotFound`] for missing entities, and
    /// [`BoardRepositoryError::CrossBoardMove`] when the destination column
    /// belongs to a different board. The check runs inside the transaction,
    /// so a concurrent re-parenting cannot smuggle a task across boards.
    async fn move_task(
        &self,
        task_id: TaskId,
        to_column: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<TaskMove>;

    /// Deletes a task (with its comments and assignees) and renumbers its
    /// former column, atomically. Returns the deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, task_id: TaskId) -> BoardRepositoryResult<Task>;

    /// Returns the task's assignees in assignment order.
    async fn assignees_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<UserId>>;

    /// Replaces the task's assignee set, returning who was added and who was
    /// removed. Callers are responsible for membership filtering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn replace_assignees(
        &self,
        task_id: TaskId,
        user_ids: Vec<UserId>,
    ) -> BoardRepositoryResult<AssigneeDiff>;

    /// Appends a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn add_comment(&self, new_comment: NewComment) -> BoardRepositoryResult<Comment>;

    /// Returns the task's comments oldest-first, tombstoned ones excluded.
    async fn comments_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<Comment>>;

    /// Tombstones a comment; the row persists with `deleted_at` set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::CommentNotFound`] when the comment
    /// does not exist.
    async fn tombstone_comment(&self, comment_id: CommentId) -> BoardRepositoryResult<Comment>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The comment was not found.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),

    /// A task move targeted a column on a different board.
    #[error("task {task} cannot move from board {from_board} to board {to_board}")]
    CrossBoardMove {
        /// Task being moved.
        task: TaskId,
        /// Board of the task's current column.
        from_board: BoardId,
        /// Board of the requested destination column.
        to_board: BoardId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
