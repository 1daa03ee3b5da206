//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing validated board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The column name exceeds 120 characters.
    #[error("column name is {0} characters long, maximum is 120")]
    ColumnNameTooLong(usize),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds 200 characters.
    #[error("task title is {0} characters long, maximum is 200")]
    TaskTitleTooLong(usize),

    /// The task description exceeds 20 000 characters.
    #[error("task description is {0} characters long, maximum is 20000")]
    DescriptionTooLong(usize),

    /// The comment body is empty after trimming.
    #[error("comment body must not be empty")]
    EmptyCommentBody,
}
