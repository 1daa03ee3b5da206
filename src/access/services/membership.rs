//! Board membership management service.

use super::{GateError, PermissionGate};
use crate::access::domain::{AccessError, MemberRole, Membership};
use crate::access::ports::{
    FriendshipRepository, MembershipRepository, MembershipRepositoryError,
};
use crate::activity::domain::{ActivityPayload, RequestContext};
use crate::activity::ports::ActivityStore;
use crate::activity::services::ActivityRecorder;
use crate::board::domain::{BoardId, UserId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by membership management.
#[derive(Debug, Clone, Error)]
pub enum MembershipServiceError {
    /// The permission gate denied the caller.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// The user already holds a membership on the board.
    #[error("user {user} is already a member of board {board}")]
    AlreadyMember {
        /// Board the add targeted.
        board: BoardId,
        /// User already on the board.
        user: UserId,
    },

    /// Owners cannot remove themselves through this path.
    #[error("owner {user} cannot remove themselves from board {board}")]
    SelfRemoval {
        /// Board the removal targeted.
        board: BoardId,
        /// The owner attempting self-removal.
        user: UserId,
    },

    /// Storage failure.
    #[error("repository error: {0}")]
    Repository(Arc<dyn std::error::Error + Send + Sync>),
}

/// Result type for membership management operations.
pub type MembershipServiceResult<T> = Result<T, MembershipServiceError>;

impl From<GateError> for MembershipServiceError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Forbidden(denied) => Self::Forbidden(denied),
            GateError::Membership(source) => Self::Repository(Arc::new(source)),
            GateError::Friendship(source) => Self::Repository(Arc::new(source)),
        }
    }
}

impl From<MembershipRepositoryError> for MembershipServiceError {
    fn from(err: MembershipRepositoryError) -> Self {
        match err {
            MembershipRepositoryError::AlreadyMember { board, user } => {
                Self::AlreadyMember { board, user }
            }
            MembershipRepositoryError::Persistence(source) => Self::Repository(source),
        }
    }
}

/// Adds and removes board members under owner + friendship rules.
#[derive(Clone)]
pub struct MembershipService<M, F, S, C>
where
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    membership: Arc<M>,
    gate: PermissionGate<M, F>,
    recorder: ActivityRecorder<S, C>,
}

impl<M, F, S, C> MembershipService<M, F, S, C>
where
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    /// Creates a membership service.
    #[must_use]
    pub const fn new(
        membership: Arc<M>,
        gate: PermissionGate<M, F>,
        recorder: ActivityRecorder<S, C>,
    ) -> Self {
        Self {
            membership,
            gate,
            recorder,
        }
    }

    /// Adds `user` to the board as a regular member.
    ///
    /// Only the board owner may add members, and only accepted friends of
    /// the owner can be added.
    ///
    /// # Errors
    ///
    /// Returns forbidden when the actor is not the owner or the pair are
    /// not accepted friends, and
    /// [`MembershipServiceError::AlreadyMember`] for duplicates.
    pub async fn add_member(
        &self,
        actor: UserId,
        board_id: BoardId,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> MembershipServiceResult<Membership> {
        self.gate.require_board_owner(board_id, actor).await?;
        self.gate
            .require_accepted_friendship(actor, user_id)
            .await?;

        let membership = self
            .membership
            .add_member(board_id, user_id, MemberRole::Member)
            .await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                user_id.value(),
                ActivityPayload::MemberAdded { user_id },
                ctx,
            )
            .await;
        Ok(membership)
    }

    /// Removes `user` from the board.
    ///
    /// Only the board owner may remove members; owners cannot remove
    /// themselves through this path.
    ///
    /// # Errors
    ///
    /// Returns forbidden when the actor is not the owner, or
    /// [`MembershipServiceError::SelfRemoval`] when the owner targets
    /// themselves.
    pub async fn remove_member(
        &self,
        actor: UserId,
        board_id: BoardId,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> MembershipServiceResult<bool> {
        self.gate.require_board_owner(board_id, actor).await?;
        if actor == user_id {
            return Err(MembershipServiceError::SelfRemoval {
                board: board_id,
                user: user_id,
            });
        }

        let removed = self.membership.remove_member(board_id, user_id).await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                user_id.value(),
                ActivityPayload::MemberRemoved { user_id },
                ctx,
            )
            .await;
        Ok(removed)
    }

    /// Returns all memberships of a board, as a board member.
    ///
    /// # Errors
    ///
    /// Returns forbidden when the actor is not a member.
    pub async fn members_of_board(
        &self,
        actor: UserId,
        board_id: BoardId,
    ) -> MembershipServiceResult<Vec<Membership>> {
        self.gate.require_board_member(board_id, actor).await?;
        Ok(self.membership.members_of_board(board_id).await?)
    }
}
