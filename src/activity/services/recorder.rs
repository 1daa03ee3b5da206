//! Append-side activity recording.

use crate::activity::domain::{EntityRef, NewActivityEntry, RequestContext};
use crate::activity::domain::ActivityPayload;
use crate::activity::ports::ActivityStore;
use crate::board::domain::{BoardId, UserId};
use mockable::Clock;
use std::sync::Arc;

/// Records one activity entry per mutating action.
///
/// Recording is best effort by design: a failed audit write must never fail
/// the mutation it describes, so [`ActivityRecorder::record`] swallows store
/// errors after reporting them to the diagnostic log. Callers treat the
/// recorder as infallible.
pub struct ActivityRecorder<S, C>
where
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

// Derived Clone would bound S and C themselves; only the Arcs need cloning.
impl<S, C> Clone for ActivityRecorder<S, C>
where
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ActivityRecorder<S, C>
where
    S: ActivityStore,
    C: Clock + Send + Sync,
{
    /// Creates a recorder over the given store and clock.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Appends an entry describing one mutating action.
    ///
    /// The entity kind comes from the payload itself, so the stored entity
    /// reference and action tag cannot disagree. Store failures are logged
    /// at warn level and discarded.
    pub async fn record(
        &self,
        actor: UserId,
        board_id: Option<BoardId>,
        entity_id: i64,
        payload: ActivityPayload,
        ctx: &RequestContext,
    ) {
        let action = payload.action();
        let entry = NewActivityEntry {
            actor,
            board_id,
            entity: EntityRef {
                kind: payload.entity_kind(),
                id: entity_id,
            },
            payload,
            ip: ctx.ip.clone(),
            user_agent: ctx.user_agent.clone(),
            created_at: self.clock.utc(),
        };

        if let Err(err) = self.store.append(entry).await {
            tracing::warn!(
                action,
                actor = actor.value(),
                entity_id,
                error = %err,
                "activity entry dropped: audit store write failed"
            );
        }
    }
}
