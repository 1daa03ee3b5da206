//! `PostgreSQL` actor directory backed by the users table.

use super::{models::UserRow, schema::users};
use crate::activity::{
    domain::ActorIdentity,
    ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult},
};
use crate::board::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL`-backed actor directory.
#[derive(Debug, Clone)]
pub struct PostgresActorDirectory {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PostgresActorDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorDirectory for PostgresActorDirectory {
    async fn resolve(&self, user_id: UserId) -> ActorDirectoryResult<Option<ActorIdentity>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActorDirectoryError::persistence)?;
            let row = users::table
                .filter(users::id.eq(user_id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut connection)
                .optional()
                .map_err(ActorDirectoryError::persistence)?;
            Ok(row.map(|row| ActorIdentity {
                id: UserId::new(row.id),
                display_name: row.display_name,
                email: row.email,
                avatar_ref: row.avatar_ref,
            }))
        })
        .await
        .map_err(ActorDirectoryError::persistence)?
    }
}
