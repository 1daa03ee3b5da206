//! Diesel schema for the activity log and the user directory.

diesel::table! {
    /// Append-only activity log; rows are never updated or deleted.
    activity_log (id) {
        /// Entry identifier.
        id -> BigInt,
        /// Acting user.
        user_id -> BigInt,
        /// Board the action occurred on; null for board-independent actions.
        board_id -> Nullable<BigInt>,
        /// Primary entity kind.
        #[max_length = 32]
        entity_type -> Varchar,
        /// Primary entity identifier.
        entity_id -> BigInt,
        /// Canonical dot-notation action name.
        #[max_length = 64]
        action -> Varchar,
        /// Serialized payload; the embedded `action` key matches the column.
        meta -> Jsonb,
        /// Client address captured from the request, when known.
        #[max_length = 64]
        ip -> Nullable<Varchar>,
        /// Client user agent captured from the request, when known.
        user_agent -> Nullable<Text>,
        /// Entry timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered users; consulted for actor identity at read time.
    users (id) {
        /// User identifier.
        id -> BigInt,
        /// Display name.
        #[max_length = 120]
        display_name -> Varchar,
        /// Email address.
        #[max_length = 254]
        email -> Varchar,
        /// Optional avatar reference.
        avatar_ref -> Nullable<Text>,
    }
}
