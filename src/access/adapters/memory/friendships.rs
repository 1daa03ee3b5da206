//! In-memory friendship store for tests and examples.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::access::domain::{Friendship, FriendshipStatus};
use crate::access::ports::{
    FriendshipRepository, FriendshipRepositoryError, FriendshipRepositoryResult,
};
use crate::board::domain::UserId;

/// Thread-safe in-memory friendship repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFriendshipStore {
    friendships: Arc<RwLock<Vec<Friendship>>>,
}

impl InMemoryFriendshipStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a friendship with the given status.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipRepositoryError::Persistence`] when the state
    /// lock is poisoned.
    pub fn add(
        &self,
        requester_id: UserId,
        addressee_id: UserId,
        status: FriendshipStatus,
    ) -> FriendshipRepositoryResult<()> {
        let mut friendships = self.friendships.write().map_err(|err| {
            FriendshipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        friendships.push(Friendship {
            requester_id,
            addressee_id,
            status,
        });
        Ok(())
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryFriendshipStore {
    async fn accepted_between(&self, a: UserId, b: UserId) -> FriendshipRepositoryResult<bool> {
        let friendships = self.friendships.read().map_err(|err| {
            FriendshipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(friendships.iter().any(|friendship| {
            friendship.status == FriendshipStatus::Accepted
                && ((friendship.requester_id == a && friendship.addressee_id == b)
                    || (friendship.requester_id == b && friendship.addressee_id == a))
        }))
    }
}
