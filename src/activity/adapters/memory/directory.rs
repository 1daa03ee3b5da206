//! In-memory actor directory for tests and examples.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::activity::domain::ActorIdentity;
use crate::activity::ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
use crate::board::domain::UserId;

/// Thread-safe in-memory actor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    identities: Arc<RwLock<HashMap<UserId, ActorIdentity>>>,
}

impl InMemoryActorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a user's public identity.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn upsert(&self, identity: ActorIdentity) -> ActorDirectoryResult<()> {
        let mut identities = self.identities.write().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        identities.insert(identity.id, identity);
        Ok(())
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn resolve(&self, user_id: UserId) -> ActorDirectoryResult<Option<ActorIdentity>> {
        let identities = self.identities.read().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(identities.get(&user_id).cloned())
    }
}
