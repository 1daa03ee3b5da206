//! Unit tests for paginated feed reads and actor enrichment.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use crate::activity::adapters::memory::{InMemoryActivityStore, InMemoryActorDirectory};
use crate::activity::domain::{
    ActivityPayload, ActorIdentity, EntityRef, NewActivityEntry, Page, RequestContext,
};
use crate::activity::ports::ActivityStore;
use crate::activity::services::ActivityFeed;
use crate::board::domain::{BoardId, ColumnId, CommentId, TaskId, UserId};
use chrono::{Duration, Utc};
use rstest::rstest;
use std::sync::Arc;

const ACTOR: UserId = UserId::new(1);
const BOARD: BoardId = BoardId::new(10);

fn entry(payload: ActivityPayload, entity: EntityRef, minutes_ago: i64) -> NewActivityEntry {
    let ctx = RequestContext::absent();
    NewActivityEntry {
        actor: ACTOR,
        board_id: Some(BOARD),
        entity,
        payload,
        ip: ctx.ip,
        user_agent: ctx.user_agent,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

fn task_entry(task_id: TaskId, minutes_ago: i64) -> NewActivityEntry {
    entry(
        ActivityPayload::TaskCreated {
            task_id,
            title: "t".to_owned(),
            column_id: ColumnId::new(1),
            column_name: "Todo".to_owned(),
        },
        EntityRef {
            kind: crate::activity::domain::EntityKind::Task,
            id: task_id.value(),
        },
        minutes_ago,
    )
}

#[rstest]
#[case::oversized(1_000, -3, 200, 0)]
#[case::undersized(0, 5, 1, 5)]
#[case::in_range(25, 10, 25, 10)]
fn page_clamps_instead_of_rejecting(
    #[case] limit: i64,
    #[case] offset: i64,
    #[case] expected_limit: i64,
    #[case] expected_offset: i64,
) {
    let page = Page::clamped(limit, offset);
    assert_eq!(page.limit(), expected_limit);
    assert_eq!(page.offset(), expected_offset);
}

#[rstest]
fn default_page_is_fifty_from_the_start() {
    let page = Page::default();
    assert_eq!(page.limit(), Page::DEFAULT_LIMIT);
    assert_eq!(page.offset(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_feed_is_newest_first_and_windowed() {
    let store = Arc::new(InMemoryActivityStore::new());
    let directory = Arc::new(InMemoryActorDirectory::new());
    for age in 0..5 {
        store
            .append(task_entry(TaskId::new(age + 100), age))
            .await
            .expect("append should succeed");
    }
    let feed = ActivityFeed::new(Arc::clone(&store), directory);

    let first_page = feed
        .for_board(BOARD, Page::clamped(2, 0))
        .await
        .expect("read should succeed");
    let second_page = feed
        .for_board(BOARD, Page::clamped(2, 2))
        .await
        .expect("read should succeed");

    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);
    // Age 0 is the newest entry.
    assert_eq!(first_page[0].entry.payload.task_id(), Some(TaskId::new(100)));
    assert_eq!(second_page[0].entry.payload.task_id(), Some(TaskId::new(102)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_feed_matches_primary_and_payload_references() {
    let store = Arc::new(InMemoryActivityStore::new());
    let directory = Arc::new(InMemoryActorDirectory::new());
    let task_id = TaskId::new(7);

    store
        .append(task_entry(task_id, 3))
        .await
        .expect("append should succeed");
    // Comment entries are comment-primary but reference the task in their
    // payload, so the task feed must include them.
    store
        .append(entry(
            ActivityPayload::CommentAdded {
                task_id,
                title: "t".to_owned(),
                column_id: ColumnId::new(1),
                column_name: "Todo".to_owned(),
                comment_id: CommentId::new(99),
                body_preview: "hello".to_owned(),
            },
            EntityRef {
                kind: crate::activity::domain::EntityKind::Comment,
                id: 99,
            },
            1,
        ))
        .await
        .expect("append should succeed");
    store
        .append(task_entry(TaskId::new(8), 0))
        .await
        .expect("append should succeed");

    let feed = ActivityFeed::new(Arc::clone(&store), directory);
    let views = feed
        .for_task(task_id, Page::default())
        .await
        .expect("read should succeed");

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].entry.payload.action(), "comment.added");
    assert_eq!(views[1].entry.payload.action(), "task.created");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_enriches_known_actors_and_tolerates_missing_ones() {
    let store = Arc::new(InMemoryActivityStore::new());
    let directory = Arc::new(InMemoryActorDirectory::new());
    directory
        .upsert(ActorIdentity {
            id: ACTOR,
            display_name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            avatar_ref: Some("avatars/ada.png".to_owned()),
        })
        .expect("directory seeds");

    store
        .append(task_entry(TaskId::new(1), 1))
        .await
        .expect("append should succeed");
    let mut ghost = task_entry(TaskId::new(2), 0);
    ghost.actor = UserId::new(404);
    store.append(ghost).await.expect("append should succeed");

    let feed = ActivityFeed::new(Arc::clone(&store), directory);
    let views = feed
        .for_board(BOARD, Page::default())
        .await
        .expect("read should succeed");

    assert_eq!(views.len(), 2);
    assert!(views[0].actor.is_none());
    let known = views[1].actor.as_ref().expect("actor resolves");
    assert_eq!(known.display_name, "Ada");
}
