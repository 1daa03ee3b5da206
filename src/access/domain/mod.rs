//! Domain types for board membership and friendship checks.

use crate::board::domain::{BoardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role a user holds on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Board creator; may delete columns and manage members.
    Owner,
    /// Regular collaborator.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing member roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseRoleError(pub String);

/// A user's membership on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Board the membership belongs to.
    pub board_id: BoardId,
    /// Member user.
    pub user_id: UserId,
    /// Role held on the board.
    pub role: MemberRole,
    /// When the user joined the board.
    pub created_at: DateTime<Utc>,
}

/// Friendship lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    /// Request sent, not yet answered.
    Pending,
    /// Request accepted; the pair are friends.
    Accepted,
    /// Request declined.
    Rejected,
    /// Addressee blocked the requester.
    Blocked,
}

impl FriendshipStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Blocked => "blocked",
        }
    }
}

/// A directed friendship record between two users.
///
/// Acceptance checks are direction-agnostic: either user may have been the
/// requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    /// User that sent the request.
    pub requester_id: UserId,
    /// User that received the request.
    pub addressee_id: UserId,
    /// Current lifecycle state.
    pub status: FriendshipStatus,
}

/// Authorization denials produced by the permission gate.
///
/// These are distinct from not-found errors: the gate answers "may this
/// user act here", never "does this entity exist".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The user is not a member of the board.
    #[error("user {user} is not a member of board {board}")]
    NotAMember {
        /// Board the check ran against.
        board: BoardId,
        /// User that was denied.
        user: UserId,
    },

    /// The user is a member but not the board owner.
    #[error("user {user} is not the owner of board {board}")]
    NotOwner {
        /// Board the check ran against.
        board: BoardId,
        /// User that was denied.
        user: UserId,
    },

    /// The two users have no accepted friendship.
    #[error("users {a} and {b} are not accepted friends")]
    NotFriends {
        /// First user of the pair.
        a: UserId,
        /// Second user of the pair.
        b: UserId,
    },
}
