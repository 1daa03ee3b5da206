//! Orchestration services for the activity context.

mod feed;
mod recorder;

pub use feed::{ActivityFeed, ActivityFeedError, ActivityFeedResult, ActivityView};
pub use recorder::ActivityRecorder;
