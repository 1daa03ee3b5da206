//! Typed activity payloads, one shape per action.
//!
//! The legacy log stored an open JSON map under an inconsistently named
//! `action` string (`task.created` next to `COLUMN_DELETED`). Here the
//! payload is a tagged union: the serde tag carries the canonical
//! dot-notation action name, so the action vocabulary is normalized and the
//! payload shape per action is checked at compile time. Serialized entries
//! remain plain JSON objects with an `action` key.
//!
//! Each payload contains everything needed to render a readable feed line
//! without store lookups beyond the actor's identity.

use super::EntityKind;
use crate::board::domain::{ColumnId, CommentId, TaskField, TaskId, TaskSnapshot, UserId};
use serde::{Deserialize, Serialize};

/// Structured description of one mutating action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ActivityPayload {
    /// A board was created.
    #[serde(rename = "board.created")]
    BoardCreated {
        /// Board name.
        name: String,
    },

    /// A board was renamed.
    #[serde(rename = "board.renamed")]
    BoardRenamed {
        /// Name before the rename.
        from: String,
        /// Name after the rename.
        to: String,
    },

    /// A board and all of its contents were deleted.
    #[serde(rename = "board.deleted")]
    BoardDeleted {
        /// Board name at deletion time.
        name: String,
    },

    /// A column was created at the end of its board.
    #[serde(rename = "column.created")]
    ColumnCreated {
        /// Column name.
        name: String,
        /// Position assigned at creation.
        position: i32,
    },

    /// A column was renamed.
    #[serde(rename = "column.renamed")]
    ColumnRenamed {
        /// Name before the rename.
        from: String,
        /// Name after the rename.
        to: String,
    },

    /// A column was relocated within its board.
    #[serde(rename = "column.moved")]
    ColumnMoved {
        /// Position before the move.
        from: i32,
        /// Position after the move.
        to: i32,
    },

    /// A column was deleted.
    #[serde(rename = "column.deleted")]
    ColumnDeleted {
        /// Column name at deletion time.
        name: String,
    },

    /// A task was created at the end of a column.
    #[serde(rename = "task.created")]
    TaskCreated {
        /// Created task.
        task_id: TaskId,
        /// Task title.
        title: String,
        /// Parent column.
        column_id: ColumnId,
        /// Parent column name.
        column_name: String,
    },

    /// A task's fields were edited.
    #[serde(rename = "task.updated")]
    TaskUpdated {
        /// Edited task.
        task_id: TaskId,
        /// Title after the edit.
        title: String,
        /// Parent column.
        column_id: ColumnId,
        /// Parent column name.
        column_name: String,
        /// Which fields changed.
        fields: Vec<TaskField>,
        /// Field values before the edit.
        before: TaskSnapshot,
        /// Field values after the edit.
        after: TaskSnapshot,
    },

    /// A task was moved between columns or reordered within one.
    #[serde(rename = "task.moved")]
    TaskMoved {
        /// Moved task.
        task_id: TaskId,
        /// Task title.
        title: String,
        /// Column the task left.
        from_column_id: ColumnId,
        /// Name of the column the task left.
        from_column_name: String,
        /// Column the task landed in.
        to_column_id: ColumnId,
        /// Name of the column the task landed in.
        to_column_name: String,
        /// Committed position in the destination column.
        new_position: i32,
    },

    /// A task was deleted.
    #[serde(rename = "task.deleted")]
    TaskDeleted {
        /// Deleted task.
        task_id: TaskId,
        /// Title at deletion time.
        title: String,
        /// Column the task belonged to.
        column_id: ColumnId,
        /// Name of that column.
        column_name: String,
    },

    /// A user was assigned to a task.
    #[serde(rename = "task.assignee.added")]
    AssigneeAdded {
        /// Affected task.
        task_id: TaskId,
        /// Task title.
        title: String,
        /// Parent column.
        column_id: ColumnId,
        /// Parent column name.
        column_name: String,
        /// Newly assigned user.
        assignee_user_id: UserId,
        /// Assignee display name, when resolvable at write time.
        assignee_name: Option<String>,
        /// Assignee email, when resolvable at write time.
        assignee_email: Option<String>,
    },

    /// A user was unassigned from a task.
    #[serde(rename = "task.assignee.removed")]
    AssigneeRemoved {
        /// Affected task.
        task_id: TaskId,
        /// Task title.
        title: String,
        /// Parent column.
        column_id: ColumnId,
        /// Parent column name.
        column_name: String,
        /// Unassigned user.
        assignee_user_id: UserId,
        /// Assignee display name, when resolvable at write time.
        assignee_name: Option<String>,
        /// Assignee email, when resolvable at write time.
        assignee_email: Option<String>,
    },

    /// A comment was added to a task.
    #[serde(rename = "comment.added")]
    CommentAdded {
        /// Commented task.
        task_id: TaskId,
        /// Task title.
        title: String,
        /// Parent column.
        column_id: ColumnId,
        /// Parent column name.
        column_name: String,
        /// Created comment.
        comment_id: CommentId,
        /// Single-line preview of the comment body.
        body_preview: String,
    },

    /// A user was added to a board.
    #[serde(rename = "member.added")]
    MemberAdded {
        /// Added user.
        user_id: UserId,
    },

    /// A user was removed from a board.
    #[serde(rename = "member.removed")]
    MemberRemoved {
        /// Removed user.
        user_id: UserId,
    },

    /// A friend request was sent.
    #[serde(rename = "friend.request_sent")]
    FriendRequestSent {
        /// Request recipient.
        addressee_id: UserId,
    },

    /// A friend request was accepted.
    #[serde(rename = "friend.request_accepted")]
    FriendRequestAccepted {
        /// Original requester.
        requester_id: UserId,
    },

    /// A friendship was dissolved.
    #[serde(rename = "friend.removed")]
    FriendRemoved {
        /// The removed friend.
        user_id: UserId,
    },
}

impl ActivityPayload {
    /// Returns the canonical action name (the serde tag value).
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::BoardCreated { .. } => "board.created",
            Self::BoardRenamed { .. } => "board.renamed",
            Self::BoardDeleted { .. } => "board.deleted",
            Self::ColumnCreated { .. } => "column.created",
            Self::ColumnRenamed { .. } => "column.renamed",
            Self::ColumnMoved { .. } => "column.moved",
            Self::ColumnDeleted { .. } => "column.deleted",
            Self::TaskCreated { .. } => "task.created",
            Self::TaskUpdated { .. } => "task.updated",
            Self::TaskMoved { .. } => "task.moved",
            Self::TaskDeleted { .. } => "task.deleted",
            Self::AssigneeAdded { .. } => "task.assignee.added",
            Self::AssigneeRemoved { .. } => "task.assignee.removed",
            Self::CommentAdded { .. } => "comment.added",
            Self::MemberAdded { .. } => "member.added",
            Self::MemberRemoved { .. } => "member.removed",
            Self::FriendRequestSent { .. } => "friend.request_sent",
            Self::FriendRequestAccepted { .. } => "friend.request_accepted",
            Self::FriendRemoved { .. } => "friend.removed",
        }
    }

    /// Returns the entity kind this payload describes.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        match self {
            Self::BoardCreated { .. } | Self::BoardRenamed { .. } | Self::BoardDeleted { .. } => {
                EntityKind::Board
            }
            Self::ColumnCreated { .. }
            | Self::ColumnRenamed { .. }
            | Self::ColumnMoved { .. }
            | Self::ColumnDeleted { .. } => EntityKind::Column,
            Self::TaskCreated { .. }
            | Self::TaskUpdated { .. }
            | Self::TaskMoved { .. }
            | Self::TaskDeleted { .. }
            | Self::AssigneeAdded { .. }
            | Self::AssigneeRemoved { .. } => EntityKind::Task,
            Self::CommentAdded { .. } => EntityKind::Comment,
            Self::MemberAdded { .. } | Self::MemberRemoved { .. } => EntityKind::Member,
            Self::FriendRequestSent { .. }
            | Self::FriendRequestAccepted { .. }
            | Self::FriendRemoved { .. } => EntityKind::Friend,
        }
    }

    /// Returns the task referenced by this payload, when there is one.
    ///
    /// Comment and assignee actions carry the task here rather than as the
    /// primary entity; the task feed matches on either.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::TaskCreated { task_id, .. }
            | Self::TaskUpdated { task_id, .. }
            | Self::TaskMoved { task_id, .. }
            | Self::TaskDeleted { task_id, .. }
            | Self::AssigneeAdded { task_id, .. }
            | Self::AssigneeRemoved { task_id, .. }
            | Self::CommentAdded { task_id, .. } => Some(*task_id),
            _ => None,
        }
    }
}
