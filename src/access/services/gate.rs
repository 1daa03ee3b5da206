//! Permission gate: binary authorization checks for core mutations.
//!
//! Every mutating path consults the gate strictly before touching any
//! ordering or entity state. The checks are read-then-decide with no side
//! effects.

use crate::access::domain::{AccessError, MemberRole};
use crate::access::ports::{
    FriendshipRepository, FriendshipRepositoryError, MembershipRepository,
    MembershipRepositoryError,
};
use crate::board::domain::{BoardId, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while evaluating a permission check.
#[derive(Debug, Clone, Error)]
pub enum GateError {
    /// The check ran and the user was denied.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// Membership lookup failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),

    /// Friendship lookup failed.
    #[error(transparent)]
    Friendship(#[from] FriendshipRepositoryError),
}

/// Result type for permission gate checks.
pub type GateResult<T> = Result<T, GateError>;

/// Authorization checks over board membership and friendships.
#[derive(Debug, Clone)]
pub struct PermissionGate<M, F>
where
    M: MembershipRepository,
    F: FriendshipRepository,
{
    membership: Arc<M>,
    friendship: Arc<F>,
}

impl<M, F> PermissionGate<M, F>
where
    M: MembershipRepository,
    F: FriendshipRepository,
{
    /// Creates a gate over the given repositories.
    #[must_use]
    pub const fn new(membership: Arc<M>, friendship: Arc<F>) -> Self {
        Self {
            membership,
            friendship,
        }
    }

    /// Returns `true` when the user holds any membership on the board.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Membership`] when the lookup fails.
    pub async fn is_board_member(&self, board: BoardId, user: UserId) -> GateResult<bool> {
        let membership = self.membership.find_membership(board, user).await?;
        Ok(membership.is_some())
    }

    /// Passes when the user is a member of the board.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] (as [`GateError::Forbidden`])
    /// when the user holds no membership.
    pub async fn require_board_member(&self, board: BoardId, user: UserId) -> GateResult<()> {
        if self.is_board_member(board, user).await? {
            return Ok(());
        }
        Err(AccessError::NotAMember { board, user }.into())
    }

    /// Passes when the user's membership role is `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotOwner`] (as [`GateError::Forbidden`]) when
    /// the user is absent or holds a non-owner role.
    pub async fn require_board_owner(&self, board: BoardId, user: UserId) -> GateResult<()> {
        let membership = self.membership.find_membership(board, user).await?;
        match membership {
            Some(m) if m.role == MemberRole::Owner => Ok(()),
            _ => Err(AccessError::NotOwner { board, user }.into()),
        }
    }

    /// Passes when an accepted friendship exists between the two users, in
    /// either direction.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFriends`] (as [`GateError::Forbidden`])
    /// when no accepted friendship exists.
    pub async fn require_accepted_friendship(&self, a: UserId, b: UserId) -> GateResult<()> {
        if self.friendship.accepted_between(a, b).await? {
            return Ok(());
        }
        Err(AccessError::NotFriends { a, b }.into())
    }
}
