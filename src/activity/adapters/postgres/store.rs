//! `PostgreSQL` append-only store for activity log entries.

use super::{
    models::{ActivityRow, NewActivityRow},
    schema::activity_log,
};
use crate::activity::{
    domain::{ActivityEntry, ActivityId, ActivityPayload, EntityKind, EntityRef, NewActivityEntry, Page},
    ports::{ActivityStore, ActivityStoreError, ActivityStoreResult},
};
use crate::board::domain::{BoardId, TaskId, UserId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by activity adapters.
pub type ActivityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed activity store.
#[derive(Debug, Clone)]
pub struct PostgresActivityStore {
    pool: ActivityPgPool,
}

impl PostgresActivityStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActivityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityStoreError::persistence)?
    }
}

#[async_trait]
impl ActivityStore for PostgresActivityStore {
    async fn append(&self, entry: NewActivityEntry) -> ActivityStoreResult<ActivityEntry> {
        let new_row = to_new_row(&entry)?;
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(activity_log::table)
                .values(&new_row)
                .get_result::<ActivityRow>(connection)
                .map_err(ActivityStoreError::persistence)?;
            row_to_entry(row)
        })
        .await
    }

    async fn for_board(
        &self,
        board_id: BoardId,
        page: Page,
    ) -> ActivityStoreResult<Vec<ActivityEntry>> {
        self.run_blocking(move |connection| {
            let rows = activity_log::table
                .filter(activity_log::board_id.eq(board_id.value()))
                .order((activity_log::created_at.desc(), activity_log::id.desc()))
                .limit(page.limit())
                .offset(page.offset())
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityStoreError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn for_task(
        &self,
        task_id: TaskId,
        page: Page,
    ) -> ActivityStoreResult<Vec<ActivityEntry>> {
        self.run_blocking(move |connection| {
            // Comment and assignee entries reference the task inside their
            // payload rather than as the primary entity, hence the JSONB
            // probe on the second arm.
            let query = diesel::sql_query(concat!(
                "SELECT id, user_id, board_id, entity_type, entity_id, action, meta, ip, ",
                "user_agent, created_at FROM activity_log ",
                "WHERE (entity_type = 'task' AND entity_id = $1) ",
                "OR (meta->>'task_id')::BIGINT = $1 ",
                "ORDER BY created_at DESC, id DESC ",
                "LIMIT $2 OFFSET $3",
            ))
            .bind::<diesel::sql_types::BigInt, _>(task_id.value())
            .bind::<diesel::sql_types::BigInt, _>(page.limit())
            .bind::<diesel::sql_types::BigInt, _>(page.offset());

            let rows = query
                .get_results::<ActivityRow>(connection)
                .map_err(ActivityStoreError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn to_new_row(entry: &NewActivityEntry) -> ActivityStoreResult<NewActivityRow> {
    let meta = serde_json::to_value(&entry.payload).map_err(ActivityStoreError::persistence)?;
    Ok(NewActivityRow {
        user_id: entry.actor.value(),
        board_id: entry.board_id.map(BoardId::value),
        entity_type: entry.entity.kind.as_str().to_owned(),
        entity_id: entry.entity.id,
        action: entry.payload.action().to_owned(),
        meta,
        ip: entry.ip.clone(),
        user_agent: entry.user_agent.clone(),
        created_at: entry.created_at,
    })
}

fn row_to_entry(row: ActivityRow) -> ActivityStoreResult<ActivityEntry> {
    let kind = EntityKind::try_from(row.entity_type.as_str())
        .map_err(ActivityStoreError::persistence)?;
    let payload = serde_json::from_value::<ActivityPayload>(row.meta)
        .map_err(ActivityStoreError::persistence)?;
    Ok(ActivityEntry {
        id: ActivityId::new(row.id),
        actor: UserId::new(row.user_id),
        board_id: row.board_id.map(BoardId::new),
        entity: EntityRef {
            kind,
            id: row.entity_id,
        },
        payload,
        ip: row.ip,
        user_agent: row.user_agent,
        created_at: row.created_at,
    })
}
