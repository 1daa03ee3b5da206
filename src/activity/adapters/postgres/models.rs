//! Diesel row models for the activity log and user directory.

use super::schema::{activity_log, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for activity log entries.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = activity_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Entry identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Acting user.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub user_id: i64,
    /// Board the action occurred on.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::BigInt>)]
    pub board_id: Option<i64>,
    /// Primary entity kind.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub entity_type: String,
    /// Primary entity identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub entity_id: i64,
    /// Canonical action name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub action: String,
    /// Serialized payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub meta: Value,
    /// Client address, when known.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub ip: Option<String>,
    /// Client user agent, when known.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub user_agent: Option<String>,
    /// Entry timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for activity log entries; the identifier is
/// database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivityRow {
    /// Acting user.
    pub user_id: i64,
    /// Board the action occurred on.
    pub board_id: Option<i64>,
    /// Primary entity kind.
    pub entity_type: String,
    /// Primary entity identifier.
    pub entity_id: i64,
    /// Canonical action name.
    pub action: String,
    /// Serialized payload.
    pub meta: Value,
    /// Client address, when known.
    pub ip: Option<String>,
    /// Client user agent, when known.
    pub user_agent: Option<String>,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for user directory lookups.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Optional avatar reference.
    pub avatar_ref: Option<String>,
}
