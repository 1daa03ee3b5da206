//! Actor identity lookup port for feed enrichment.

use crate::activity::domain::ActorIdentity;
use crate::board::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for actor directory operations.
pub type ActorDirectoryResult<T> = Result<T, ActorDirectoryError>;

/// Resolves a user id to its public display identity.
///
/// Consulted at read time only, so historical log rows never duplicate
/// mutable user data.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Resolves a user's public identity; `None` for unknown users.
    async fn resolve(&self, user_id: UserId) -> ActorDirectoryResult<Option<ActorIdentity>>;
}

/// Errors returned by actor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ActorDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActorDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
