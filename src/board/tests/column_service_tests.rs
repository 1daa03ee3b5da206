//! Service orchestration tests for column lifecycle and reordering.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use crate::access::adapters::memory::{InMemoryFriendshipStore, InMemoryMembershipStore};
use crate::access::domain::{AccessError, MemberRole};
use crate::access::ports::MembershipRepository;
use crate::access::services::PermissionGate;
use crate::activity::adapters::memory::InMemoryActivityStore;
use crate::activity::domain::{ActivityPayload, RequestContext};
use crate::activity::services::ActivityRecorder;
use crate::board::adapters::memory::InMemoryBoardStore;
use crate::board::domain::{BoardId, ColumnId, UserId};
use crate::board::services::{BoardServiceError, ColumnService, NotFound};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

const OWNER: UserId = UserId::new(1);
const MEMBER: UserId = UserId::new(2);
const OUTSIDER: UserId = UserId::new(9);

type TestColumnService = ColumnService<
    InMemoryBoardStore,
    InMemoryMembershipStore,
    InMemoryFriendshipStore,
    InMemoryActivityStore,
    DefaultClock,
>;

struct Harness {
    board_id: BoardId,
    activity: Arc<InMemoryActivityStore>,
    service: TestColumnService,
}

#[fixture]
async fn harness() -> Harness {
    let repository = Arc::new(InMemoryBoardStore::new());
    let memberships = Arc::new(InMemoryMembershipStore::new());
    let friendships = Arc::new(InMemoryFriendshipStore::new());
    let activity = Arc::new(InMemoryActivityStore::new());

    let board_id = repository.create_board("Sprint").expect("board seeds");
    memberships
        .add_member(board_id, OWNER, MemberRole::Owner)
        .await
        .expect("owner seeds");
    memberships
        .add_member(board_id, MEMBER, MemberRole::Member)
        .await
        .expect("member seeds");

    let gate = PermissionGate::new(Arc::clone(&memberships), Arc::clone(&friendships));
    let recorder = ActivityRecorder::new(Arc::clone(&activity), Arc::new(DefaultClock));
    let service = ColumnService::new(repository, gate, recorder);
    Harness {
        board_id,
        activity,
        service,
    }
}

async fn seed_columns(harness: &Harness, names: &[&str]) -> Vec<ColumnId> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let column = harness
            .service
            .create_column(MEMBER, harness.board_id, *name, &RequestContext::absent())
            .await
            .expect("column creation should succeed");
        ids.push(column.id);
    }
    ids
}

async fn positions(harness: &Harness) -> Vec<(ColumnId, i32)> {
    harness
        .service
        .columns_of_board(MEMBER, harness.board_id)
        .await
        .expect("listing should succeed")
        .into_iter()
        .map(|column| (column.id, column.position))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_columns_append_at_the_end(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["Todo", "Doing", "Done"]).await;

    assert_eq!(
        positions(&harness).await,
        vec![(ids[0], 0), (ids[1], 1), (ids[2], 2)]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_middle_column_to_front_shifts_the_displaced(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["A", "B", "C"]).await;

    let moved = harness
        .service
        .move_column(MEMBER, ids[1], 0, &RequestContext::absent())
        .await
        .expect("move should succeed");

    assert_eq!(moved.position, 0);
    assert_eq!(
        positions(&harness).await,
        vec![(ids[1], 0), (ids[0], 1), (ids[2], 2)]
    );
}

#[rstest]
#[case::negative(-3, 0)]
#[case::past_end(99, 2)]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_move_clamps_without_error(
    #[future] harness: Harness,
    #[case] requested: i64,
    #[case] landed: i32,
) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["A", "B", "C"]).await;

    let moved = harness
        .service
        .move_column(MEMBER, ids[1], requested, &RequestContext::absent())
        .await
        .expect("clamped move should succeed");
    assert_eq!(moved.position, landed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_op_move_still_records_activity(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["A", "B"]).await;
    let before = harness.activity.all_entries().expect("log reads").len();

    harness
        .service
        .move_column(MEMBER, ids[1], 1, &RequestContext::absent())
        .await
        .expect("no-op move should succeed");

    let entries = harness.activity.all_entries().expect("log reads");
    assert_eq!(entries.len(), before + 1);
    let last = entries.last().expect("entry appended");
    assert!(matches!(
        last.payload,
        ActivityPayload::ColumnMoved { from: 1, to: 1 }
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_column_closes_the_position_gap(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["A", "B", "C"]).await;

    harness
        .service
        .delete_column(OWNER, ids[1], &RequestContext::absent())
        .await
        .expect("owner delete should succeed");

    assert_eq!(positions(&harness).await, vec![(ids[0], 0), (ids[2], 1)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_requires_the_board_owner(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["A"]).await;

    let result = harness
        .service
        .delete_column(MEMBER, ids[0], &RequestContext::absent())
        .await;
    assert!(matches!(
        result,
        Err(BoardServiceError::Forbidden(AccessError::NotOwner { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_members_cannot_create_columns(#[future] harness: Harness) {
    let harness = harness.await;

    let result = harness
        .service
        .create_column(OUTSIDER, harness.board_id, "Todo", &RequestContext::absent())
        .await;
    assert!(matches!(
        result,
        Err(BoardServiceError::Forbidden(AccessError::NotAMember { .. }))
    ));
    assert!(harness.activity.all_entries().expect("log reads").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_column_name_is_rejected_before_any_write(#[future] harness: Harness) {
    let harness = harness.await;

    let result = harness
        .service
        .create_column(MEMBER, harness.board_id, "   ", &RequestContext::absent())
        .await;
    assert!(matches!(result, Err(BoardServiceError::Validation(_))));
    assert!(positions(&harness).await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_board_reports_not_found(#[future] harness: Harness) {
    let harness = harness.await;

    let result = harness
        .service
        .create_column(
            MEMBER,
            BoardId::new(404),
            "Todo",
            &RequestContext::absent(),
        )
        .await;
    assert!(matches!(
        result,
        Err(BoardServiceError::NotFound(NotFound::Board(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_logs_old_and_new_names(#[future] harness: Harness) {
    let harness = harness.await;
    let ids = seed_columns(&harness, &["Todo"]).await;

    harness
        .service
        .rename_column(MEMBER, ids[0], "In Progress", &RequestContext::absent())
        .await
        .expect("rename should succeed");

    let entries = harness.activity.all_entries().expect("log reads");
    let last = entries.last().expect("entry appended");
    let ActivityPayload::ColumnRenamed { from, to } = &last.payload else {
        panic!("expected a rename payload");
    };
    assert_eq!(from, "Todo");
    assert_eq!(to, "In Progress");
}
