//! Task entity, change sets, and field-level diffing for audit records.

use super::{ColumnId, DeletionPolicy, TaskDescription, TaskId, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task card.
///
/// Tasks are ordered within their column. Unlike a column's board, a task's
/// `column_id` is mutable: moving a task re-parents it and renumbers both
/// the source and destination sibling sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned task identifier.
    pub id: TaskId,
    /// Current parent column.
    pub column_id: ColumnId,
    /// Task title.
    pub title: TaskTitle,
    /// Optional long-form description.
    pub description: Option<TaskDescription>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub done: bool,
    /// Dense position within the column, starting at zero.
    pub position: i32,
    /// User that created the task.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Tasks are removed outright; the former column is renumbered in the
    /// same unit of work.
    pub const DELETION: DeletionPolicy = DeletionPolicy::Hard;

    /// Captures the audit-relevant fields for before/after comparison.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            title: self.title.as_str().to_owned(),
            description: self
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned()),
            due_date: self.due_date,
            done: self.done,
        }
    }
}

/// Partial update applied to a task.
///
/// `None` leaves a field untouched; the nested options distinguish "clear
/// the value" from "leave it alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description (`Some(None)` clears it).
    pub description: Option<Option<TaskDescription>>,
    /// Replacement due date (`Some(None)` clears it).
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement completion flag.
    pub done: Option<bool>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.done.is_none()
    }
}

/// Point-in-time copy of a task's mutable, audit-relevant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Title at capture time.
    pub title: String,
    /// Description at capture time.
    pub description: Option<String>,
    /// Due date at capture time.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag at capture time.
    pub done: bool,
}

/// Mutable task fields tracked by the audit diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// The task title.
    Title,
    /// The long-form description.
    Description,
    /// The due date.
    DueDate,
    /// The completion flag.
    Done,
}

impl TaskField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "due_date",
            Self::Done => "done",
        }
    }
}

/// Lists the fields that differ between two snapshots.
#[must_use]
pub fn changed_fields(before: &TaskSnapshot, after: &TaskSnapshot) -> Vec<TaskField> {
    let mut fields = Vec::new();
    if before.title != after.title {
        fields.push(TaskField::Title);
    }
    if before.description != after.description {
        fields.push(TaskField::Description);
    }
    if before.due_date != after.due_date {
        fields.push(TaskField::DueDate);
    }
    if before.done != after.done {
        fields.push(TaskField::Done);
    }
    fields
}
