//! Diesel row models for board persistence.

use super::schema::{board_columns, task_comments, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Internal column identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Owning board.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub board_id: i64,
    /// Column name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Dense position within the board.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub position: i32,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for column records; the identifier is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Owning board.
    pub board_id: i64,
    /// Column name.
    pub name: String,
    /// Dense position within the board.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Parent column.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub column_id: i64,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Optional long-form description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Optional due date.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub done: bool,
    /// Dense position within the column.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub position: i32,
    /// Creating user.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub created_by: i64,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records; the identifier is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Parent column.
    pub column_id: i64,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub done: bool,
    /// Dense position within the column.
    pub position: i32,
    /// Creating user.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = task_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Internal comment identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Commented task.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_id: i64,
    /// Comment author.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub author_id: i64,
    /// Comment text.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub body: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Tombstone timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for comment records; the identifier is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_comments)]
pub struct NewCommentRow {
    /// Commented task.
    pub task_id: i64,
    /// Comment author.
    pub author_id: i64,
    /// Comment text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
