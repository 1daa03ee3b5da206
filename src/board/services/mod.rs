//! Orchestration services for the board context.
//!
//! Services run the same sequence for every mutation: validate input,
//! resolve the referenced entities, consult the permission gate, perform the
//! atomic repository operation, then record an activity entry. The activity
//! step is best effort and cannot fail the mutation.

mod columns;
mod tasks;

pub use columns::ColumnService;
pub use tasks::TaskService;

use crate::access::domain::AccessError;
use crate::access::services::GateError;
use crate::board::domain::{BoardDomainError, BoardId, ColumnId, CommentId, TaskId};
use crate::board::ports::BoardRepositoryError;
use std::sync::Arc;
use thiserror::Error;

/// A referenced entity that does not exist.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NotFound {
    /// The board was not found.
    #[error("board not found: {0}")]
    Board(BoardId),
    /// The column was not found.
    #[error("column not found: {0}")]
    Column(ColumnId),
    /// The task was not found.
    #[error("task not found: {0}")]
    Task(TaskId),
    /// The comment was not found.
    #[error("comment not found: {0}")]
    Comment(CommentId),
}

/// Errors surfaced by board services.
///
/// The kinds mirror the caller-facing taxonomy: validation, not-found,
/// forbidden, cross-board rejection, and storage failure. Storage failures
/// arrive only after the adapter has rolled the unit of work back.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// Input failed domain validation before any store access.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The permission gate denied the caller.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// A task move targeted a column on a different board.
    #[error("task {task} cannot move from board {from_board} to board {to_board}")]
    CrossBoard {
        /// Task being moved.
        task: TaskId,
        /// Board of the task's current column.
        from_board: BoardId,
        /// Board of the requested destination column.
        to_board: BoardId,
    },

    /// Storage failure; no partial state was committed.
    #[error("repository error: {0}")]
    Repository(Arc<dyn std::error::Error + Send + Sync>),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

impl From<BoardRepositoryError> for BoardServiceError {
    fn from(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::BoardNotFound(id) => Self::NotFound(NotFound::Board(id)),
            BoardRepositoryError::ColumnNotFound(id) => Self::NotFound(NotFound::Column(id)),
            BoardRepositoryError::TaskNotFound(id) => Self::NotFound(NotFound::Task(id)),
            BoardRepositoryError::CommentNotFound(id) => Self::NotFound(NotFound::Comment(id)),
            BoardRepositoryError::CrossBoardMove {
                task,
                from_board,
                to_board,
            } => Self::CrossBoard {
                task,
                from_board,
                to_board,
            },
            BoardRepositoryError::Persistence(source) => Self::Repository(source),
        }
    }
}

impl From<GateError> for BoardServiceError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Forbidden(denied) => Self::Forbidden(denied),
            GateError::Membership(source) => Self::Repository(Arc::new(source)),
            GateError::Friendship(source) => Self::Repository(Arc::new(source)),
        }
    }
}
