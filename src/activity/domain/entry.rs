//! Activity log entries and supporting read/write types.

use super::ActivityPayload;
use crate::board::domain::{BoardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(i64);

impl ActivityId {
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

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of entity an activity entry acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A board.
    Board,
    /// A board column.
    Column,
    /// A task card.
    Task,
    /// A task comment.
    Comment,
    /// A board membership.
    Member,
    /// A friendship record.
    Friend,
}

impl EntityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Column => "column",
            Self::Task => "task",
            Self::Comment => "comment",
            Self::Member => "member",
            Self::Friend => "friend",
        }
    }
}

impl TryFrom<&str> for EntityKind {
    type Error = ParseEntityKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "column" => Ok(Self::Column),
            "task" => Ok(Self::Task),
            "comment" => Ok(Self::Comment),
            "member" => Ok(Self::Member),
            "friend" => Ok(Self::Friend),
            _ => Err(ParseEntityKindError(value.to_owned())),
        }
    }
}

/// Error returned while parsing entity kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown entity kind: {0}")]
pub struct ParseEntityKindError(pub String);

/// The entity an activity entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind.
    pub kind: EntityKind,
    /// Entity identifier within its kind.
    pub id: i64,
}

/// Request provenance captured with each entry.
///
/// Passed explicitly at every recording call site; nothing here is pulled
/// from ambient state. Both fields are best effort and absent for
/// non-HTTP-triggered mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Client IP address.
    pub ip: Option<String>,
    /// Client user-agent string.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Context for mutations with no originating request.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            ip: None,
            user_agent: None,
        }
    }
}

/// Public identity of an activity actor, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    /// Actor user id.
    pub id: UserId,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Reference to the actor's avatar, if any.
    pub avatar_ref: Option<String>,
}

/// An immutable, append-only activity log entry.
///
/// Entries are never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Store-assigned entry identifier.
    pub id: ActivityId,
    /// User that performed the action.
    pub actor: UserId,
    /// Board context; `None` for board-less actions such as friend events.
    pub board_id: Option<BoardId>,
    /// Entity acted upon.
    pub entity: EntityRef,
    /// Typed description of what changed.
    pub payload: ActivityPayload,
    /// Client IP, when known.
    pub ip: Option<String>,
    /// Client user-agent, when known.
    pub user_agent: Option<String>,
    /// Creation timestamp; immutable.
    pub created_at: DateTime<Utc>,
}

/// An entry awaiting its store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityEntry {
    /// User that performed the action.
    pub actor: UserId,
    /// Board context; `None` for board-less actions.
    pub board_id: Option<BoardId>,
    /// Entity acted upon.
    pub entity: EntityRef,
    /// Typed description of what changed.
    pub payload: ActivityPayload,
    /// Client IP, when known.
    pub ip: Option<String>,
    /// Client user-agent, when known.
    pub user_agent: Option<String>,
    /// Creation timestamp stamped by the recorder.
    pub created_at: DateTime<Utc>,
}

/// Clamped pagination window for activity reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Largest number of entries a single read returns.
    pub const MAX_LIMIT: i64 = 200;
    /// Limit applied when callers do not specify one.
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Creates a page, clamping `limit` into `[1, 200]` and flooring
    /// `offset` at zero. Out-of-range values are adjusted, never rejected.
    #[must_use]
    pub fn clamped(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Returns the clamped limit.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }

    /// Returns the clamped offset.
    #[must_use]
    pub const fn offset(self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::clamped(Self::DEFAULT_LIMIT, 0)
    }
}
