//! Column entity: an ordered lane of tasks within a board.

use super::{BoardId, ColumnId, ColumnName, DeletionPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A board column.
///
/// Columns are ordered within their board; `position` is maintained by the
/// ordering engine and is dense across the board's columns. The parent board
/// of a column never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Store-assigned column identifier.
    pub id: ColumnId,
    /// Owning board; immutable for the lifetime of the column.
    pub board_id: BoardId,
    /// Display name.
    pub name: ColumnName,
    /// Dense position within the board, starting at zero.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Column {
    /// Columns are removed outright; their ordering scope is renumbered in
    /// the same unit of work.
    pub const DELETION: DeletionPolicy = DeletionPolicy::Hard;
}
