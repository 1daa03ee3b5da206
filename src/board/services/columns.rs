//! Column lifecycle and reordering service.

use super::{BoardServiceResult, NotFound};
use crate::access::ports::{FriendshipRepository, MembershipRepository};
use crate::access::services::PermissionGate;
use crate::activity::domain::{ActivityPayload, RequestContext};
use crate::activity::ports::ActivityStore;
use crate::activity::services::ActivityRecorder;
use crate::board::domain::{BoardId, Column, ColumnId, ColumnName, UserId};
use crate::board::ports::{BoardRepository, ColumnMove};
use mockable::Clock;
use std::sync::Arc;

/// Orchestrates column creation, renaming, reordering, and deletion.
///
/// Reordering delegates to the repository's atomic move operation, which
/// runs the ordering engine over the board's column scope inside one unit of
/// work. Every successful mutation emits exactly one activity entry.
#[derive(Clone)]
pub struct ColumnService<R, M, F, S, C>
where
    R: BoardRepository,
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gate: PermissionGate<M, F>,
    recorder: ActivityRecorder<S, C>,
}

impl<R, M, F, S, C> ColumnService<R, M, F, S, C>
where
    R: BoardRepository,
    M: MembershipRepository,
    F: FriendshipRepository,
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    /// Creates a column service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        gate: PermissionGate<M, F>,
        recorder: ActivityRecorder<S, C>,
    ) -> Self {
        Self {
            repository,
            gate,
            recorder,
        }
    }

    /// Creates a column at the end of the board, as a board member.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an ill-formed name, not-found for a
    /// missing board, or forbidden when the actor is not a member.
    pub async fn create_column(
        &self,
        actor: UserId,
        board_id: BoardId,
        name: impl Into<String>,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Column> {
        let name = ColumnName::new(name)?;
        if !self.repository.board_exists(board_id).await? {
            return Err(NotFound::Board(board_id).into());
        }
        self.gate.require_board_member(board_id, actor).await?;

        let column = self.repository.create_column(board_id, &name).await?;
        self.recorder
            .record(
                actor,
                Some(board_id),
                column.id.value(),
                ActivityPayload::ColumnCreated {
                    name: column.name.as_str().to_owned(),
                    position: column.position,
                },
                ctx,
            )
            .await;
        Ok(column)
    }

    /// Renames a column, as a board member.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an ill-formed name, not-found for a
    /// missing column, or forbidden when the actor is not a member.
    pub async fn rename_column(
        &self,
        actor: UserId,
        column_id: ColumnId,
        name: impl Into<String>,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Column> {
        let name = ColumnName::new(name)?;
        let column = self
            .repository
            .find_column(column_id)
            .await?
            .ok_or(NotFound::Column(column_id))?;
        self.gate
            .require_board_member(column.board_id, actor)
            .await?;

        let renamed = self.repository.rename_column(column_id, &name).await?;
        self.recorder
            .record(
                actor,
                Some(renamed.board_id),
                renamed.id.value(),
                ActivityPayload::ColumnRenamed {
                    from: column.name.as_str().to_owned(),
                    to: renamed.name.as_str().to_owned(),
                },
                ctx,
            )
            .await;
        Ok(renamed)
    }

    /// Moves a column to the requested position within its board, as a
    /// board member.
    ///
    /// Out-of-range positions clamp to the scope bounds. A move to the
    /// column's current position is a legal no-op that still renumbers and
    /// still logs.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing column or forbidden when the actor
    /// is not a member.
    pub async fn move_column(
        &self,
        actor: UserId,
        column_id: ColumnId,
        requested: i64,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Column> {
        let column = self
            .repository
            .find_column(column_id)
            .await?
            .ok_or(NotFound::Column(column_id))?;
        self.gate
            .require_board_member(column.board_id, actor)
            .await?;

        let ColumnMove { column: moved, from, to } =
            self.repository.move_column(column_id, requested).await?;
        self.recorder
            .record(
                actor,
                Some(moved.board_id),
                moved.id.value(),
                ActivityPayload::ColumnMoved { from, to },
                ctx,
            )
            .await;
        Ok(moved)
    }

    /// Deletes a column and its tasks, as the board owner.
    ///
    /// The board's remaining columns renumber in the same unit of work, so
    /// the dense-position invariant holds immediately after the delete.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing column or forbidden when the actor
    /// is not the board owner.
    pub async fn delete_column(
        &self,
        actor: UserId,
        column_id: ColumnId,
        ctx: &RequestContext,
    ) -> BoardServiceResult<Column> {
        let column = self
            .repository
            .find_column(column_id)
            .await?
            .ok_or(NotFound::Column(column_id))?;
        self.gate.require_board_owner(column.board_id, actor).await?;

        let deleted = self.repository.delete_column(column_id).await?;
        self.recorder
            .record(
                actor,
                Some(deleted.board_id),
                deleted.id.value(),
                ActivityPayload::ColumnDeleted {
                    name: deleted.name.as_str().to_owned(),
                },
                ctx,
            )
            .await;
        Ok(deleted)
    }

    /// Returns the board's columns in position order, as a board member.
    ///
    /// # Errors
    ///
    /// Returns forbidden when the actor is not a member.
    pub async fn columns_of_board(
        &self,
        actor: UserId,
        board_id: BoardId,
    ) -> BoardServiceResult<Vec<Column>> {
        self.gate.require_board_member(board_id, actor).await?;
        Ok(self.repository.columns_of_board(board_id).await?)
    }
}
