//! Domain types for the activity context.

mod entry;
mod payload;

pub use entry::{
    ActivityEntry, ActivityId, ActorIdentity, EntityKind, EntityRef, NewActivityEntry, Page,
    ParseEntityKindError, RequestContext,
};
pub use payload::ActivityPayload;
