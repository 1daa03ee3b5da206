//! Identifier newtypes and validated scalar types for the board domain.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! integer_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned identifier value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id! {
    /// Unique identifier for a board.
    BoardId
}

integer_id! {
    /// Unique identifier for a column within the system.
    ColumnId
}

integer_id! {
    /// Unique identifier for a task within the system.
    TaskId
}

integer_id! {
    /// Unique identifier for a registered user.
    UserId
}

integer_id! {
    /// Unique identifier for a task comment.
    CommentId
}

/// Validated column name: non-empty after trimming, at most 120 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    const MAX_CHARS: usize = 120;

    /// Creates a validated column name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] when the trimmed value
    /// is empty or [`BoardDomainError::ColumnNameTooLong`] when it exceeds
    /// 120 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        let chars = trimmed.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(BoardDomainError::ColumnNameTooLong(chars));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task title: non-empty after trimming, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_CHARS: usize = 200;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the trimmed value is
    /// empty or [`BoardDomainError::TaskTitleTooLong`] when it exceeds 200
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        let chars = trimmed.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(BoardDomainError::TaskTitleTooLong(chars));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task description: at most 20 000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    const MAX_CHARS: usize = 20_000;

    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DescriptionTooLong`] when the value
    /// exceeds 20 000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let chars = raw.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(BoardDomainError::DescriptionTooLong(chars));
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validated comment body: non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    /// Creates a validated comment body.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCommentBody`] when the trimmed value
    /// is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCommentBody);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the body as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a single-line preview of at most `max` characters.
    ///
    /// Whitespace runs collapse to single spaces; longer bodies are truncated
    /// with a trailing ellipsis.
    #[must_use]
    pub fn preview(&self, max: usize) -> String {
        let collapsed = self.0.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max {
            return collapsed;
        }
        let mut preview: String = collapsed.chars().take(max).collect();
        preview.push('…');
        preview
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
