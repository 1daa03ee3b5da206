//! `PostgreSQL` repository implementation for board storage.
//!
//! Compound operations run inside a single transaction and take `FOR UPDATE`
//! row locks on every sibling scope they renumber, so concurrent reorders of
//! the same scope serialize and each commits a dense position set.

use super::{
    models::{ColumnRow, CommentRow, NewColumnRow, NewCommentRow, NewTaskRow, TaskRow},
    schema::{board_columns, boards, task_assignees, task_comments, tasks},
};
use crate::board::{
    domain::{
        BoardId, Column, ColumnId, ColumnName, Comment, CommentBody, CommentId, Task, TaskChanges,
        TaskDescription, TaskId, TaskTitle, UserId,
        ordering::{self, Slot},
    },
    ports::{
        AssigneeDiff, BoardRepository, BoardRepositoryError, BoardRepositoryResult, ColumnMove,
        NewComment, NewTask, TaskMove,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed board repository.
#[derive(Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: BoardPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Creates a repository that stamps rows with the supplied clock.
    #[must_use]
    pub fn with_clock(pool: BoardPgPool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn board_exists(&self, board_id: BoardId) -> BoardRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let found = boards::table
                .filter(boards::id.eq(board_id.value()))
                .select(boards::id)
                .first::<i64>(connection)
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }

    async fn find_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(column_id.value()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn find_task(&self, task_id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(task_id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn columns_of_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .filter(board_columns::board_id.eq(board_id.value()))
                .order((board_columns::position.asc(), board_columns::id.asc()))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn tasks_of_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::column_id.eq(column_id.value()))
                .order((tasks::position.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn create_column(
        &self,
        board_id: BoardId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column> {
        let name = name.as_str().to_owned();
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Column, BoardRepositoryError, _>(|connection| {
                let board = boards::table
                    .filter(boards::id.eq(board_id.value()))
                    .select(boards::id)
                    .first::<i64>(connection)
                    .optional()?;
                if board.is_none() {
                    return Err(BoardRepositoryError::BoardNotFound(board_id));
                }

                let siblings = locked_column_slots(connection, board_id)?;
                let position = rank_after(siblings.len());
                let row = diesel::insert_into(board_columns::table)
                    .values(&NewColumnRow {
                        board_id: board_id.value(),
                        name,
                        position,
                        created_at: clock.utc(),
                    })
                    .get_result::<ColumnRow>(connection)?;
                row_to_column(row)
            })
        })
        .await
    }

    async fn rename_column(
        &self,
        column_id: ColumnId,
        name: &ColumnName,
    ) -> BoardRepositoryResult<Column> {
        let name = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(board_columns::table.filter(board_columns::id.eq(column_id.value())))
                .set(board_columns::name.eq(name))
                .get_result::<ColumnRow>(connection)
                .optional()?
                .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
            row_to_column(row)
        })
        .await
    }

    async fn move_column(
        &self,
        column_id: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<ColumnMove> {
        self.run_blocking(move |connection| {
            connection.transaction::<ColumnMove, BoardRepositoryError, _>(|connection| {
                let row = board_columns::table
                    .filter(board_columns::id.eq(column_id.value()))
                    .select(ColumnRow::as_select())
                    .for_update()
                    .first::<ColumnRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
                let board_id = BoardId::new(row.board_id);
                let from = row.position;

                let siblings = locked_column_slots(connection, board_id)?;
                apply_column_positions(
                    connection,
                    &ordering::inserted_at(&siblings, column_id, requested),
                )?;

                let row = board_columns::table
                    .filter(board_columns::id.eq(column_id.value()))
                    .select(ColumnRow::as_select())
                    .first::<ColumnRow>(connection)?;
                let to = row.position;
                Ok(ColumnMove {
                    column: row_to_column(row)?,
                    from,
                    to,
                })
            })
        })
        .await
    }

    async fn delete_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Column> {
        self.run_blocking(move |connection| {
            connection.transaction::<Column, BoardRepositoryError, _>(|connection| {
                let row = board_columns::table
                    .filter(board_columns::id.eq(column_id.value()))
                    .select(ColumnRow::as_select())
                    .for_update()
                    .first::<ColumnRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::ColumnNotFound(column_id))?;
                let board_id = BoardId::new(row.board_id);

                let column_tasks = tasks::table
                    .filter(tasks::column_id.eq(column_id.value()))
                    .select(tasks::id);
                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq_any(column_tasks)),
                )
                .execute(connection)?;
                diesel::delete(
                    task_comments::table.filter(task_comments::task_id.eq_any(column_tasks)),
                )
                .execute(connection)?;
                diesel::delete(tasks::table.filter(tasks::column_id.eq(column_id.value())))
                    .execute(connection)?;
                diesel::delete(board_columns::table.filter(board_columns::id.eq(column_id.value())))
                    .execute(connection)?;

                let remaining = locked_column_slots(connection, board_id)?;
                apply_column_positions(connection, &ordering::normalized(&remaining))?;

                row_to_column(row)
            })
        })
        .await
    }

    async fn create_task(&self, new_task: NewTask) -> BoardRepositoryResult<Task> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Task, BoardRepositoryError, _>(|connection| {
                let column = board_columns::table
                    .filter(board_columns::id.eq(new_task.column_id.value()))
                    .select(board_columns::id)
                    .for_update()
                    .first::<i64>(connection)
                    .optional()?;
                if column.is_none() {
                    return Err(BoardRepositoryError::ColumnNotFound(new_task.column_id));
                }

                let siblings = locked_task_slots(connection, new_task.column_id)?;
                let now = clock.utc();
                let row = diesel::insert_into(tasks::table)
                    .values(&NewTaskRow {
                        column_id: new_task.column_id.value(),
                        title: new_task.title.as_str().to_owned(),
                        description: None,
                        due_date: None,
                        done: false,
                        position: rank_after(siblings.len()),
                        created_by: new_task.created_by.value(),
                        created_at: now,
                        updated_at: now,
                    })
                    .get_result::<TaskRow>(connection)?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn update_task(
        &self,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> BoardRepositoryResult<Task> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Task, BoardRepositoryError, _>(|connection| {
                let row = tasks::table
                    .filter(tasks::id.eq(task_id.value()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;

                let title = changes
                    .title
                    .map_or(row.title, |title| title.as_str().to_owned());
                let description = changes.description.map_or(row.description, |description| {
                    description.map(|description| description.as_str().to_owned())
                });
                let due_date = changes.due_date.unwrap_or(row.due_date);
                let done = changes.done.unwrap_or(row.done);

                let row = diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .set((
                        tasks::title.eq(title),
                        tasks::description.eq(description),
                        tasks::due_date.eq(due_date),
                        tasks::done.eq(done),
                        tasks::updated_at.eq(clock.utc()),
                    ))
                    .get_result::<TaskRow>(connection)?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn move_task(
        &self,
        task_id: TaskId,
        to_column: ColumnId,
        requested: i64,
    ) -> BoardRepositoryResult<TaskMove> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<TaskMove, BoardRepositoryError, _>(|connection| {
                let task_row = tasks::table
                    .filter(tasks::id.eq(task_id.value()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
                let from_column = ColumnId::new(task_row.column_id);

                // Column rows lock in ascending identifier order so two
                // opposite-direction moves between the same pair of columns
                // cannot deadlock on them.
                let mut scope_ids = vec![from_column, to_column];
                scope_ids.sort_unstable();
                scope_ids.dedup();
                let mut columns = Vec::with_capacity(scope_ids.len());
                for column_id in &scope_ids {
                    let row = board_columns::table
                        .filter(board_columns::id.eq(column_id.value()))
                        .select(ColumnRow::as_select())
                        .for_update()
                        .first::<ColumnRow>(connection)
                        .optional()?
                        .ok_or(BoardRepositoryError::ColumnNotFound(*column_id))?;
                    columns.push(row);
                }
                let source_row = find_scope(&columns, from_column)?;
                let dest_row = find_scope(&columns, to_column)?;
                if source_row.board_id != dest_row.board_id {
                    return Err(BoardRepositoryError::CrossBoardMove {
                        task: task_id,
                        from_board: BoardId::new(source_row.board_id),
                        to_board: BoardId::new(dest_row.board_id),
                    });
                }

                let mut scope_slots = Vec::with_capacity(scope_ids.len());
                for column_id in &scope_ids {
                    scope_slots.push(locked_task_slots(connection, *column_id)?);
                }

                diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .set((
                        tasks::column_id.eq(to_column.value()),
                        tasks::updated_at.eq(clock.utc()),
                    ))
                    .execute(connection)?;

                for (column_id, slots) in scope_ids.iter().zip(&scope_slots) {
                    let assignments = if *column_id == to_column {
                        ordering::inserted_at(slots, task_id, requested)
                    } else {
                        let remaining: Vec<Slot<TaskId>> = slots
                            .iter()
                            .filter(|slot| slot.id != task_id)
                            .copied()
                            .collect();
                        ordering::normalized(&remaining)
                    };
                    apply_task_positions(connection, &assignments)?;
                }

                let task_row = tasks::table
                    .filter(tasks::id.eq(task_id.value()))
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(connection)?;
                Ok(TaskMove {
                    task: row_to_task(task_row)?,
                    from_column: row_to_column(source_row.clone())?,
                    to_column: row_to_column(dest_row.clone())?,
                })
            })
        })
        .await
    }

    async fn delete_task(&self, task_id: TaskId) -> BoardRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<Task, BoardRepositoryError, _>(|connection| {
                let row = tasks::table
                    .filter(tasks::id.eq(task_id.value()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;
                let column_id = ColumnId::new(row.column_id);

                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq(task_id.value())),
                )
                .execute(connection)?;
                diesel::delete(
                    task_comments::table.filter(task_comments::task_id.eq(task_id.value())),
                )
                .execute(connection)?;
                diesel::delete(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .execute(connection)?;

                let remaining = locked_task_slots(connection, column_id)?;
                apply_task_positions(connection, &ordering::normalized(&remaining))?;

                row_to_task(row)
            })
        })
        .await
    }

    async fn assignees_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let user_ids = task_assignees::table
                .filter(task_assignees::task_id.eq(task_id.value()))
                .order((task_assignees::created_at.asc(), task_assignees::user_id.asc()))
                .select(task_assignees::user_id)
                .load::<i64>(connection)?;
            Ok(user_ids.into_iter().map(UserId::new).collect())
        })
        .await
    }

    async fn replace_assignees(
        &self,
        task_id: TaskId,
        user_ids: Vec<UserId>,
    ) -> BoardRepositoryResult<AssigneeDiff> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<AssigneeDiff, BoardRepositoryError, _>(|connection| {
                let task = tasks::table
                    .filter(tasks::id.eq(task_id.value()))
                    .select(tasks::id)
                    .for_update()
                    .first::<i64>(connection)
                    .optional()?;
                if task.is_none() {
                    return Err(BoardRepositoryError::TaskNotFound(task_id));
                }

                let previous: Vec<UserId> = task_assignees::table
                    .filter(task_assignees::task_id.eq(task_id.value()))
                    .select(task_assignees::user_id)
                    .load::<i64>(connection)?
                    .into_iter()
                    .map(UserId::new)
                    .collect();

                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq(task_id.value())),
                )
                .execute(connection)?;
                let now = clock.utc();
                for user_id in &user_ids {
                    diesel::insert_into(task_assignees::table)
                        .values((
                            task_assignees::task_id.eq(task_id.value()),
                            task_assignees::user_id.eq(user_id.value()),
                            task_assignees::created_at.eq(now),
                        ))
                        .execute(connection)?;
                }

                let added = user_ids
                    .iter()
                    .filter(|user_id| !previous.contains(user_id))
                    .copied()
                    .collect();
                let removed = previous
                    .iter()
                    .filter(|user_id| !user_ids.contains(user_id))
                    .copied()
                    .collect();
                Ok(AssigneeDiff { added, removed })
            })
        })
        .await
    }

    async fn add_comment(&self, new_comment: NewComment) -> BoardRepositoryResult<Comment> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Comment, BoardRepositoryError, _>(|connection| {
                let task = tasks::table
                    .filter(tasks::id.eq(new_comment.task_id.value()))
                    .select(tasks::id)
                    .first::<i64>(connection)
                    .optional()?;
                if task.is_none() {
                    return Err(BoardRepositoryError::TaskNotFound(new_comment.task_id));
                }

                let row = diesel::insert_into(task_comments::table)
                    .values(&NewCommentRow {
                        task_id: new_comment.task_id.value(),
                        author_id: new_comment.author_id.value(),
                        body: new_comment.body.as_str().to_owned(),
                        created_at: clock.utc(),
                    })
                    .get_result::<CommentRow>(connection)?;
                row_to_comment(row)
            })
        })
        .await
    }

    async fn comments_of_task(&self, task_id: TaskId) -> BoardRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.value()))
                .filter(task_comments::deleted_at.is_null())
                .order((task_comments::created_at.asc(), task_comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn tombstone_comment(&self, comment_id: CommentId) -> BoardRepositoryResult<Comment> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Comment, BoardRepositoryError, _>(|connection| {
                let row = task_comments::table
                    .filter(task_comments::id.eq(comment_id.value()))
                    .select(CommentRow::as_select())
                    .for_update()
                    .first::<CommentRow>(connection)
                    .optional()?
                    .ok_or(BoardRepositoryError::CommentNotFound(comment_id))?;
                if row.deleted_at.is_some() {
                    return row_to_comment(row);
                }

                let row = diesel::update(
                    task_comments::table.filter(task_comments::id.eq(comment_id.value())),
                )
                .set(task_comments::deleted_at.eq(Some(clock.utc())))
                .get_result::<CommentRow>(connection)?;
                row_to_comment(row)
            })
        })
        .await
    }
}

fn rank_after(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn find_scope(columns: &[ColumnRow], column_id: ColumnId) -> BoardRepositoryResult<&ColumnRow> {
    columns
        .iter()
        .find(|row| row.id == column_id.value())
        .ok_or(BoardRepositoryError::ColumnNotFound(column_id))
}

fn locked_column_slots(
    connection: &mut PgConnection,
    board_id: BoardId,
) -> BoardRepositoryResult<Vec<Slot<ColumnId>>> {
    let rows = board_columns::table
        .filter(board_columns::board_id.eq(board_id.value()))
        .order((board_columns::position.asc(), board_columns::id.asc()))
        .select((board_columns::id, board_columns::position))
        .for_update()
        .load::<(i64, i32)>(connection)?;
    Ok(rows
        .into_iter()
        .map(|(id, position)| Slot::new(ColumnId::new(id), position))
        .collect())
}

fn locked_task_slots(
    connection: &mut PgConnection,
    column_id: ColumnId,
) -> BoardRepositoryResult<Vec<Slot<TaskId>>> {
    let rows = tasks::table
        .filter(tasks::column_id.eq(column_id.value()))
        .order((tasks::position.asc(), tasks::id.asc()))
        .select((tasks::id, tasks::position))
        .for_update()
        .load::<(i64, i32)>(connection)?;
    Ok(rows
        .into_iter()
        .map(|(id, position)| Slot::new(TaskId::new(id), position))
        .collect())
}

fn apply_column_positions(
    connection: &mut PgConnection,
    assignments: &[Slot<ColumnId>],
) -> BoardRepositoryResult<()> {
    for slot in assignments {
        diesel::update(board_columns::table.filter(board_columns::id.eq(slot.id.value())))
            .set(board_columns::position.eq(slot.position))
            .execute(connection)?;
    }
    Ok(())
}

fn apply_task_positions(
    connection: &mut PgConnection,
    assignments: &[Slot<TaskId>],
) -> BoardRepositoryResult<()> {
    for slot in assignments {
        diesel::update(tasks::table.filter(tasks::id.eq(slot.id.value())))
            .set(tasks::position.eq(slot.position))
            .execute(connection)?;
    }
    Ok(())
}

fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    Ok(Column {
        id: ColumnId::new(row.id),
        board_id: BoardId::new(row.board_id),
        name: ColumnName::new(row.name).map_err(BoardRepositoryError::persistence)?,
        position: row.position,
        created_at: row.created_at,
    })
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    Ok(Task {
        id: TaskId::new(row.id),
        column_id: ColumnId::new(row.column_id),
        title: TaskTitle::new(row.title).map_err(BoardRepositoryError::persistence)?,
        description: row
            .description
            .map(TaskDescription::new)
            .transpose()
            .map_err(BoardRepositoryError::persistence)?,
        due_date: row.due_date,
        done: row.done,
        position: row.position,
        created_by: UserId::new(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_comment(row: CommentRow) -> BoardRepositoryResult<Comment> {
    Ok(Comment {
        id: CommentId::new(row.id),
        task_id: TaskId::new(row.task_id),
        author_id: UserId::new(row.author_id),
        body: CommentBody::new(row.body).map_err(BoardRepositoryError::persistence)?,
        created_at: row.created_at,
        deleted_at: row.deleted_at,
    })
}
