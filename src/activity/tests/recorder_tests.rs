//! Unit tests for best-effort activity recording.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::activity::adapters::memory::InMemoryActivityStore;
use crate::activity::domain::{
    ActivityEntry, ActivityPayload, EntityKind, NewActivityEntry, Page, RequestContext,
};
use crate::activity::ports::{ActivityStore, ActivityStoreError, ActivityStoreResult};
use crate::activity::services::ActivityRecorder;
use crate::board::domain::{BoardId, TaskId, UserId};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_stamps_context_and_derives_the_entity_kind() {
    let store = Arc::new(InMemoryActivityStore::new());
    let recorder = ActivityRecorder::new(Arc::clone(&store), Arc::new(DefaultClock));
    let ctx = RequestContext {
        ip: Some("203.0.113.9".to_owned()),
        user_agent: Some("tessera-test/1.0".to_owned()),
    };

    recorder
        .record(
            UserId::new(1),
            Some(BoardId::new(5)),
            42,
            ActivityPayload::ColumnMoved { from: 2, to: 0 },
            &ctx,
        )
        .await;

    let entries = store.all_entries().expect("log reads");
    assert_eq!(entries.len(), 1);
    let entry = entries.first().expect("entry appended");
    assert_eq!(entry.actor, UserId::new(1));
    assert_eq!(entry.board_id, Some(BoardId::new(5)));
    assert_eq!(entry.entity.kind, EntityKind::Column);
    assert_eq!(entry.entity.id, 42);
    assert_eq!(entry.ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(entry.user_agent.as_deref(), Some("tessera-test/1.0"));
    assert_eq!(entry.payload.action(), "column.moved");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_swallowed() {
    let mut store = MockWriteOnlyStore::new();
    store.expect_append().times(1).returning(|_| {
        Err(ActivityStoreError::persistence(std::io::Error::other(
            "disk full",
        )))
    });
    let recorder = ActivityRecorder::new(Arc::new(store), Arc::new(DefaultClock));

    // Must complete normally; the recorder has no error channel.
    recorder
        .record(
            UserId::new(1),
            None,
            7,
            ActivityPayload::FriendRemoved {
                user_id: UserId::new(2),
            },
            &RequestContext::absent(),
        )
        .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn absent_context_leaves_provenance_empty() {
    let store = Arc::new(InMemoryActivityStore::new());
    let recorder = ActivityRecorder::new(Arc::clone(&store), Arc::new(DefaultClock));

    recorder
        .record(
            UserId::new(3),
            Some(BoardId::new(1)),
            3,
            ActivityPayload::MemberAdded {
                user_id: UserId::new(3),
            },
            &RequestContext::absent(),
        )
        .await;

    let entries = store.all_entries().expect("log reads");
    let entry = entries.first().expect("entry appended");
    assert!(entry.ip.is_none());
    assert!(entry.user_agent.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_share_the_store_without_bounding_the_clock() {
    let store = Arc::new(InMemoryActivityStore::new());
    // DefaultClock is not Clone; cloning must only clone the Arcs.
    let recorder = ActivityRecorder::new(Arc::clone(&store), Arc::new(DefaultClock));
    let cloned = recorder.clone();

    cloned
        .record(
            UserId::new(4),
            Some(BoardId::new(2)),
            11,
            ActivityPayload::ColumnMoved { from: 1, to: 1 },
            &RequestContext::absent(),
        )
        .await;

    let entries = store.all_entries().expect("log reads");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries.first().expect("entry appended").payload.action(),
        "column.moved"
    );
}

mockall::mock! {
    WriteOnlyStore {}

    #[async_trait::async_trait]
    impl ActivityStore for WriteOnlyStore {
        async fn append(&self, entry: NewActivityEntry) -> ActivityStoreResult<ActivityEntry>;
        async fn for_board(
            &self,
            board_id: BoardId,
            page: Page,
        ) -> ActivityStoreResult<Vec<ActivityEntry>>;
        async fn for_task(
            &self,
            task_id: TaskId,
            page: Page,
        ) -> ActivityStoreResult<Vec<ActivityEntry>>;
    }
}
