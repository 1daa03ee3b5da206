//! Diesel schema for board persistence.

diesel::table! {
    /// Boards; rows are created outside this core.
    boards (id) {
        /// Board identifier.
        id -> BigInt,
        /// Board name.
        #[max_length = 120]
        name -> Varchar,
        /// Owning user.
        owner_id -> BigInt,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered columns within a board.
    board_columns (id) {
        /// Column identifier.
        id -> BigInt,
        /// Owning board.
        board_id -> BigInt,
        /// Column name.
        #[max_length = 120]
        name -> Varchar,
        /// Dense position within the board.
        position -> Integer,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered tasks within a column.
    tasks (id) {
        /// Task identifier.
        id -> BigInt,
        /// Parent column; mutable via task moves.
        column_id -> BigInt,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Completion flag.
        done -> Bool,
        /// Dense position within the column.
        position -> Integer,
        /// Creating user.
        created_by -> BigInt,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task assignee set.
    task_assignees (task_id, user_id) {
        /// Assigned task.
        task_id -> BigInt,
        /// Assigned user.
        user_id -> BigInt,
        /// Assignment timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task comments; soft-deleted via tombstone timestamp.
    task_comments (id) {
        /// Comment identifier.
        id -> BigInt,
        /// Commented task.
        task_id -> BigInt,
        /// Comment author.
        author_id -> BigInt,
        /// Comment text.
        body -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Tombstone timestamp; non-null rows are hidden from reads.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    boards,
    board_columns,
    tasks,
    task_assignees,
    task_comments,
);
