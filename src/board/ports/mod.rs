//! Port contracts for the board context.

mod repository;

pub use repository::{
    AssigneeDiff, BoardRepository, BoardRepositoryError, BoardRepositoryResult, ColumnMove,
    NewComment, NewTask, TaskMove,
};
