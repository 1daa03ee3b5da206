//! Repository port for board membership persistence.

use crate::access::domain::{MemberRole, Membership};
use crate::board::domain::{BoardId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Board membership persistence contract.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the membership of `user` on `board`; `None` when absent.
    async fn find_membership(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>>;

    /// Returns all memberships of a board.
    async fn members_of_board(
        &self,
        board_id: BoardId,
    ) -> MembershipRepositoryResult<Vec<Membership>>;

    /// Adds a member to a board.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::AlreadyMember`] when the user is
    /// already on the board.
    async fn add_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
        role: MemberRole,
    ) -> MembershipRepositoryResult<Membership>;

    /// Removes a member from a board; returns `true` if a row was removed.
    async fn remove_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<bool>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// The user already holds a membership on the board.
    #[error("user {user} is already a member of board {board}")]
    AlreadyMember {
        /// Board the insert targeted.
        board: BoardId,
        /// User already on the board.
        user: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
