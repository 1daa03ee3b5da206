//! `PostgreSQL` repository implementation for board memberships.

use super::schema::board_members;
use crate::access::{
    domain::{MemberRole, Membership},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};
use crate::board::domain::{BoardId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by access adapters.
pub type AccessPgPool = Pool<ConnectionManager<PgConnection>>;

type MemberTuple = (i64, i64, String, DateTime<Utc>);

/// `PostgreSQL`-backed membership repository.
#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: AccessPgPool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresMembershipRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: AccessPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Creates a repository that stamps rows with the supplied clock.
    #[must_use]
    pub fn with_clock(pool: AccessPgPool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MembershipRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MembershipRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MembershipRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MembershipRepositoryError::persistence)?
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_membership(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>> {
        self.run_blocking(move |connection| {
            let row = board_members::table
                .filter(board_members::board_id.eq(board_id.value()))
                .filter(board_members::user_id.eq(user_id.value()))
                .select((
                    board_members::board_id,
                    board_members::user_id,
                    board_members::role,
                    board_members::created_at,
                ))
                .first::<MemberTuple>(connection)
                .optional()
                .map_err(MembershipRepositoryError::persistence)?;
            row.map(tuple_to_membership).transpose()
        })
        .await
    }

    async fn members_of_board(
        &self,
        board_id: BoardId,
    ) -> MembershipRepositoryResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            let rows = board_members::table
                .filter(board_members::board_id.eq(board_id.value()))
                .order((board_members::created_at.asc(), board_members::user_id.asc()))
                .select((
                    board_members::board_id,
                    board_members::user_id,
                    board_members::role,
                    board_members::created_at,
                ))
                .load::<MemberTuple>(connection)
                .map_err(MembershipRepositoryError::persistence)?;
            rows.into_iter().map(tuple_to_membership).collect()
        })
        .await
    }

    async fn add_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
        role: MemberRole,
    ) -> MembershipRepositoryResult<Membership> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            let created_at = clock.utc();
            diesel::insert_into(board_members::table)
                .values((
                    board_members::board_id.eq(board_id.value()),
                    board_members::user_id.eq(user_id.value()),
                    board_members::role.eq(role.as_str()),
                    board_members::created_at.eq(created_at),
                ))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MembershipRepositoryError::AlreadyMember {
                            board: board_id,
                            user: user_id,
                        }
                    }
                    _ => MembershipRepositoryError::persistence(err),
                })?;
            Ok(Membership {
                board_id,
                user_id,
                role,
                created_at,
            })
        })
        .await
    }

    async fn remove_member(
        &self,
        board_id: BoardId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                board_members::table
                    .filter(board_members::board_id.eq(board_id.value()))
                    .filter(board_members::user_id.eq(user_id.value())),
            )
            .execute(connection)
            .map_err(MembershipRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn tuple_to_membership(row: MemberTuple) -> MembershipRepositoryResult<Membership> {
    let (board_id, user_id, role, created_at) = row;
    Ok(Membership {
        board_id: BoardId::new(board_id),
        user_id: UserId::new(user_id),
        role: MemberRole::try_from(role.as_str())
            .map_err(MembershipRepositoryError::persistence)?,
        created_at,
    })
}
