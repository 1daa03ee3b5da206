//! Diesel schema for board memberships and friendships.

diesel::table! {
    /// Board membership rows, one per user per board.
    board_members (board_id, user_id) {
        /// Board the membership grants access to.
        board_id -> BigInt,
        /// Member user.
        user_id -> BigInt,
        /// Role held on the board.
        #[max_length = 16]
        role -> Varchar,
        /// Membership creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Friendship rows keyed by the requesting and receiving users.
    friends (requester_id, addressee_id) {
        /// User who sent the request.
        requester_id -> BigInt,
        /// User who received the request.
        addressee_id -> BigInt,
        /// Request status.
        #[max_length = 16]
        status -> Varchar,
        /// Row creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(board_members, friends);
