//! In-memory membership store for tests and examples.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::domain::{MemberRole, Membership};
use crate::access::ports::{
    MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult,
};
use crate::board::domain::{BoardId, UserId};

/// Thread-safe in-memory membership repository.
#[derive(Clone)]
pub struct InMemoryMembershipStore {
    memberships: Arc<RwLock<HashMap<(BoardId, UserId), Membership>>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl InMemoryMembershipStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            memberships: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryMembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipStore {
    async fn find_membership(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>> {
        let memberships = self.memberships.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(memberships.get(&(board_id, user_id)).cloned())
    }

    async fn members_of_board(
        &self,
        board_id: BoardId,
    ) -> MembershipRepositoryResult<Vec<Membership>> {
        let memberships = self.memberships.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut members: Vec<Membership> = memberships
            .values()
            .filter(|membership| membership.board_id == board_id)
            .cloned()
            .collect();
        members.sort_by_key(|membership| membership.user_id);
        Ok(members)
    }

    async fn add_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
        role: MemberRole,
    ) -> MembershipRepositoryResult<Membership> {
        let mut memberships = self.memberships.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if memberships.contains_key(&(board_id, user_id)) {
            return Err(MembershipRepositoryError::AlreadyMember {
                board: board_id,
                user: user_id,
            });
        }
        let membership = Membership {
            board_id,
            user_id,
            role,
            created_at: self.clock.utc(),
        };
        memberships.insert((board_id, user_id), membership.clone());
        Ok(membership)
    }

    async fn remove_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<bool> {
        let mut memberships = self.memberships.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(memberships.remove(&(board_id, user_id)).is_some())
    }
}
