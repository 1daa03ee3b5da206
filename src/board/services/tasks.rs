//! Task lifecycle, movement, assignee, and comment service.

use super::{BoardServiceError, BoardServiceResult, NotFound};
use crate::access::ports::{FriendshipRepository, MembershipRepository};
use crate::access::services::PermissionGate;
use crate::activity::domain::{ActivityPayload, ActorIdentity, RequestContext};
use crate::activity::ports::{ActivityStore, ActorDirectory};
use crate::activity::services::ActivityRecorder;
use crate::board::domain::{
    BoardId, Column, ColumnId, Comment, CommentBody, Task, TaskChanges, TaskId, TaskTitle, UserId,
    changed_fields,
};
use crate::board::ports::{BoardRepository, NewComment, NewTask, TaskMove};
use mockable::Clock;
use std::sync::Arc;

/// Number of characters kept in comment previews inside activity entries.
const COMMENT_PREVIEW_CHARS: usize = 70;

/// Orchestrates task mutations, including moves across columns.
///
/// A move resolves the source and destination columns, rejects cross-board
/// targets before any mutation, authorizes the caller, then hands the
/// re-parenting and the renumbering of both sibling scopes to the
/// repository's atomic move operation. Every successful mutation emits
/// activity; a failed activity write never rolls the mutation back.
#[derive(Clone)]
pub struct TaskService<R, M, F, S, D, C>
where
    R: BoardRepository,
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    D: ActorDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gate: PermissionGate<M, F>,
    recorder: ActivityRecorder<S, C>,
    directory: Arc<D>,
}

impl<R, M, F, S, D, C> TaskService<R, M, F, S, D, C>
where
    R: BoardRepository,
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    D: ActorDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a task service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        gate: PermissionGate<M, F>,
        recorder: ActivityRecorder<S, C>,
        directory: Arc<D>,
    ) -> Self {
        Self {
            repository,
            gate,
            recorder,
            directory,
        }
    }

    async fn column_and_board(&self, column_id: ColumnId) -> BoardServiceResult<(Column, BoardId)> {
        let column = self
            .repository
            .find_column(column_id)
            .await?
            .ok_or(NotFound::Column(column_id))?;
        let board_id = column.board_id;
        Ok((column, board_id))
    }

    async fn require_task(&self, task_id: TaskId) -> BoardServiceResult<Task> {
        self.repository
            .find_task(task_id)
            .await?
            .ok_or_else(|| NotFound::Task(task_id).into())
    }

    /// Creates a task at the end of the column, as a board member.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an ill-formed title, not-found for a
    /// missing column, or forbidden when the actor is not a member.
    pub async fn create_task(
        &self,
        actor: UserId,
        column_id: ColumnId,
        title: impl Into<String>,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Task> {
        let title = TaskTitle::new(title)?;
        let (column, board_id) = self.column_and_board(column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;

        let task = self
            .repository
            .create_task(NewTask {
                column_id,
                title,
                created_by: actor,
            })
            .await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                task.id.value(),
                ActivityPayload::TaskCreated {
                    task_id: task.id,
                    title: task.title.as_str().to_owned(),
                    column_id: column.id,
                    column_name: column.name.as_str().to_owned(),
                },
                ctx,
            )
            .await;
        Ok(task)
    }

    /// Applies a partial update to a task, as a board member.
    ///
    /// The activity entry lists the changed fields together with full
    /// before/after snapshots. An empty change set still logs, with an
    /// empty field list.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or forbidden when the actor is
    /// not a member.
    pub async fn update_task(
        &self,
        actor: UserId,
        task_id: TaskId,
        changes: TaskChanges,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Task> {
        let task = self.require_task(task_id).await?;
        let (column, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;

        let before = task.snapshot();
        let updated = self.repository.update_task(task_id, changes).await?;
        let after = updated.snapshot();

        self.recorder
            .record(
                actor,
                Some(board_id),
                updated.id.value(),
                ActivityPayload::TaskUpdated {
                    task_id: updated.id,
                    title: updated.title.as_str().to_owned(),
                    column_id: column.id,
                    column_name: column.name.as_str().to_owned(),
                    fields: changed_fields(&before, &after),
                    before,
                    after,
                },
                ctx,
            )
            .await;
        Ok(updated)
    }

    /// Moves a task to `to_column` at the requested position, as a board
    /// member.
    ///
    /// The destination must share the task's board; a cross-board target is
    /// rejected before any state changes. Out-of-range positions clamp. A
    /// move to the task's current column and position is a legal no-op that
    /// still renumbers both scopes and still logs.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or column,
    /// [`BoardServiceError::CrossBoard`] for a cross-board target, or
    /// forbidden when the actor is not a member of the shared board.
    pub async fn move_task(
        &self,
        actor: UserId,
        task_id: TaskId,
        to_column: ColumnId,
        requested: i64,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Task> {
        let task = self.require_task(task_id).await?;
        let (_, from_board) = self.column_and_board(task.column_id).await?;
        let (_, to_board) = self.column_and_board(to_column).await?;
        if from_board != to_board {
            return Err(BoardServiceError::CrossBoard {
                task: task_id,
                from_board,
                to_board,
            });
        }
        self.gate.require_board_member(to_board, actor).await?;

        let TaskMove {
            task: moved,
            from_column,
            to_column: landed,
        } = self
            .repository
            .move_task(task_id, to_column, requested)
            .await?;
        self.recorder
            .record(
                actor,
                Some(to_board),
                moved.id.value(),
                ActivityPayload::TaskMoved {
                    task_id: moved.id,
                    title: moved.title.as_str().to_owned(),
                    from_column_id: from_column.id,
                    from_column_name: from_column.name.as_str().to_owned(),
                    to_column_id: landed.id,
                    to_column_name: landed.name.as_str().to_owned(),
                    new_position: moved.position,
                },
                ctx,
            )
            .await;
        Ok(moved)
    }

    /// Deletes a task, as a board member.
    ///
    /// The former column renumbers in the same unit of work.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or forbidden when the actor is
    /// not a member.
    pub async fn delete_task(
        &self,
        actor: UserId,
        task_id: TaskId,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Task> {
        let task = self.require_task(task_id).await?;
        let (column, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;

        let deleted = self.repository.delete_task(task_id).await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                deleted.id.value(),
                ActivityPayload::TaskDeleted {
                    task_id: deleted.id,
                    title: deleted.title.as_str().to_owned(),
                    column_id: column.id,
                    column_name: column.name.as_str().to_owned(),
                },
                ctx,
            )
            .await;
        Ok(deleted)
    }

    /// Returns the task's assignees, as a board member.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or forbidden when the actor is
    /// not a member.
    pub async fn assignees_of_task(
        &self,
        actor: UserId,
        task_id: TaskId,
    ) -> BoardServiceResult<Vec<UserId>> {
        let task = self.require_task(task_id).await?;
        let (_, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;
        Ok(self.repository.assignees_of_task(task_id).await?)
    }

    /// Replaces the task's assignee set, as a board member.
    ///
    /// Only board members can be assigned; non-members in the requested set
    /// are dropped silently. One activity entry is recorded per user added
    /// and per user removed. Returns the retained set.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or forbidden when the actor is
    /// not a member.
    pub async fn set_assignees(
        &self,
        actor: UserId,
        task_id: TaskId,
        user_ids: Vec<UserId>,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Vec<UserId>> {
        let task = self.require_task(task_id).await?;
        let (column, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;

        let mut retained = Vec::new();
        for user_id in dedupe(user_ids) {
            if self.gate.is_board_member(board_id, user_id).await? {
                retained.push(user_id);
            }
        }

        let diff = self
            .repository
            .replace_assignees(task_id, retained.clone())
            .await?;

        for user_id in &diff.added {
            let identity = self.identity_of(*user_id).await;
            self.recorder
                .record(
                    actor,
                    Some(board_id),
                    task.id.value(),
                    assignee_payload(true, &task, &column, *user_id, identity),
                    ctx,
                )
                .await;
        }
        for user_id in &diff.removed {
            let identity = self.identity_of(*user_id).await;
            self.recorder
                .record(
                    actor,
                    Some(board_id),
                    task.id.value(),
                    assignee_payload(false, &task, &column, *user_id, identity),
                    ctx,
                )
                .await;
        }
        Ok(retained)
    }

    /// Adds a comment to a task, as a board member.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty body, not-found for a
    /// missing task, or forbidden when the actor is not a member.
    pub async fn add_comment(
        &self,
        actor: UserId,
        task_id: TaskId,
        body: impl Into<String>,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Comment> {
        let body = CommentBody::new(body)?;
        let task = self.require_task(task_id).await?;
        let (column, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;

        let comment = self
            .repository
            .add_comment(NewComment {
                task_id,
                author_id: actor,
                body,
            })
            .await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                comment.id.value(),
                ActivityPayload::CommentAdded {
                    task_id: task.id,
                    title: task.title.as_str().to_owned(),
                    column_id: column.id,
                    column_name: column.name.as_str().to_owned(),
                    comment_id: comment.id,
                    body_preview: comment.body.preview(COMMENT_PREVIEW_CHARS),
                },
                ctx,
            )
            .await;
        Ok(comment)
    }

    /// Returns the task's visible comments oldest-first, as a board member.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing task or forbidden when the actor is
    /// not a member.
    pub async fn comments_of_task(
        &self,
        actor: UserId,
        task_id: TaskId,
    ) -> BoardServiceResult<Vec<Comment>> {
        let task = self.require_task(task_id).await?;
        let (_, board_id) = self.column_and_board(task.column_id).await?;
        self.gate.require_board_member(board_id, actor).await?;
        Ok(self.repository.comments_of_task(task_id).await?)
    }

    // Identity lookups feed the audit payload only; a directory failure
    // must not fail a mutation that already committed.
    async fn identity_of(&self, user_id: UserId) -> Option<ActorIdentity> {
        self.directory.resolve(user_id).await.ok().flatten()
    }
}

fn dedupe(user_ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = std::collections::HashSet::new();
    user_ids
        .into_iter()
        .filter(|user_id| seen.insert(*user_id))
        .collect()
}

fn assignee_payload(
    added: bool,
    task: &Task,
    column: &Column,
    assignee: UserId,
    identity: Option<ActorIdentity>,
) -> ActivityPayload {
    let assignee_name = identity.as_ref().map(|i| i.display_name.clone());
    let assignee_email = identity.map(|i| i.email);
    if added {
        ActivityPayload::AssigneeAdded {
            task_id: task.id,
            title: task.title.as_str().to_owned(),
            column_id: column.id,
            column_name: column.name.as_str().to_owned(),
            assignee_user_id: assignee,
            assignee_name,
            assignee_email,
        }
    } else {
        ActivityPayload::AssigneeRemoved {
            task_id: task.id,
            title: task.title.as_str().to_owned(),
            column_id: column.id,
            column_name: column.name.as_str().to_owned(),
            assignee_user_id: assignee,
            assignee_name,
            assignee_email,
        }
    }
}
