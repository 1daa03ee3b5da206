//! Repository port for friendship lookups.

use crate::board::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for friendship repository operations.
pub type FriendshipRepositoryResult<T> = Result<T, FriendshipRepositoryError>;

/// Friendship lookup contract.
///
/// The gate only needs the acceptance predicate; the request workflow that
/// creates and mutates friendship rows lives outside this core.
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Returns `true` when an accepted friendship exists between the two
    /// users, in either direction.
    async fn accepted_between(&self, a: UserId, b: UserId) -> FriendshipRepositoryResult<bool>;
}

/// Errors returned by friendship repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FriendshipRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FriendshipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
