//! `PostgreSQL` repository implementation for friendship lookups.

use super::memberships::AccessPgPool;
use super::schema::friends;
use crate::access::{
    domain::FriendshipStatus,
    ports::{FriendshipRepository, FriendshipRepositoryError, FriendshipRepositoryResult},
};
use crate::board::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed friendship repository.
#[derive(Debug, Clone)]
pub struct PostgresFriendshipRepository {
    pool: AccessPgPool,
}

impl PostgresFriendshipRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccessPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendshipRepository for PostgresFriendshipRepository {
    async fn accepted_between(&self, a: UserId, b: UserId) -> FriendshipRepositoryResult<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(FriendshipRepositoryError::persistence)?;
            let accepted = FriendshipStatus::Accepted.as_str();
            let found = friends::table
                .filter(friends::status.eq(accepted))
                .filter(
                    friends::requester_id
                        .eq(a.value())
                        .and(friends::addressee_id.eq(b.value()))
                        .or(friends::requester_id
                            .eq(b.value())
                            .and(friends::addressee_id.eq(a.value()))),
                )
                .select(friends::requester_id)
                .first::<i64>(&mut connection)
                .optional()
                .map_err(FriendshipRepositoryError::persistence)?;
            Ok(found.is_some())
        })
        .await
        .map_err(FriendshipRepositoryError::persistence)?
    }
}
