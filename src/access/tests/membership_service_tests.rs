//! Service orchestration tests for board membership management.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::access::adapters::memory::{InMemoryFriendshipStore, InMemoryMembershipStore};
use crate::access::domain::{FriendshipStatus, MemberRole};
use crate::access::ports::MembershipRepository;
use crate::access::services::{MembershipService, MembershipServiceError, PermissionGate};
use crate::activity::adapters::memory::InMemoryActivityStore;
use crate::activity::domain::{ActivityPayload, RequestContext};
use crate::activity::services::ActivityRecorder;
use crate::board::domain::{BoardId, UserId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

const BOARD: BoardId = BoardId::new(1);
const OWNER: UserId = UserId::new(1);
const MEMBER: UserId = UserId::new(2);
const FRIEND: UserId = UserId::new(3);
const STRANGER: UserId = UserId::new(4);

type TestMembershipService = MembershipService<
    InMemoryMembershipStore,
    InMemoryFriendshipStore,
    InMemoryActivityStore,
    DefaultClock,
>;

struct Harness {
    activity: Arc<InMemoryActivityStore>,
    service: TestMembershipService,
}

#[fixture]
async fn harness() -> Harness {
    let memberships = Arc::new(InMemoryMembershipStore::new());
    let friendships = Arc::new(InMemoryFriendshipStore::new());
    let activity = Arc::new(InMemoryActivityStore::new());

    memberships
        .add_member(BOARD, OWNER, MemberRole::Owner)
        .await
        .expect("owner seeds");
    memberships
        .add_member(BOARD, MEMBER, MemberRole::Member)
        .await
        .expect("member seeds");
    friendships
        .add(OWNER, FRIEND, FriendshipStatus::Accepted)
        .expect("friendship seeds");

    let gate = PermissionGate::new(Arc::clone(&memberships), friendships);
    let recorder = ActivityRecorder::new(Arc::clone(&activity), Arc::new(DefaultClock));
    let service = MembershipService::new(memberships, gate, recorder);
    Harness { activity, service }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_adds_an_accepted_friend_as_member(#[future] harness: Harness) {
    let harness = harness.await;

    let membership = harness
        .service
        .add_member(OWNER, BOARD, FRIEND, &RequestContext::absent())
        .await
        .expect("add should succeed");

    assert_eq!(membership.role, MemberRole::Member);
    let entries = harness.activity.all_entries().expect("log reads");
    assert_eq!(entries.len(), 1);
    let entry = entries.first().expect("entry appended");
    assert!(matches!(
        entry.payload,
        ActivityPayload::MemberAdded { user_id: FRIEND }
    ));
    assert_eq!(entry.entity.id, FRIEND.value());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_cannot_be_added(#[future] harness: Harness) {
    let harness = harness.await;

    let result = harness
        .service
        .add_member(OWNER, BOARD, STRANGER, &RequestContext::absent())
        .await;
    assert!(matches!(
        result,
        Err(MembershipServiceError::Forbidden(_))
    ));
    assert!(harness.activity.all_entries().expect("log reads").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_owner_manages_members(#[future] harness: Harness) {
    let harness = harness.await;

    let add = harness
        .service
        .add_member(MEMBER, BOARD, FRIEND, &RequestContext::absent())
        .await;
    assert!(matches!(add, Err(MembershipServiceError::Forbidden(_))));

    let remove = harness
        .service
        .remove_member(MEMBER, BOARD, OWNER, &RequestContext::absent())
        .await;
    assert!(matches!(remove, Err(MembershipServiceError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_membership_is_reported(#[future] harness: Harness) {
    let harness = harness.await;
    harness
        .service
        .add_member(OWNER, BOARD, FRIEND, &RequestContext::absent())
        .await
        .expect("first add should succeed");

    let result = harness
        .service
        .add_member(OWNER, BOARD, FRIEND, &RequestContext::absent())
        .await;
    assert!(matches!(
        result,
        Err(MembershipServiceError::AlreadyMember {
            board: BOARD,
            user: FRIEND,
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_cannot_remove_themselves(#[future] harness: Harness) {
    let harness = harness.await;

    let result = harness
        .service
        .remove_member(OWNER, BOARD, OWNER, &RequestContext::absent())
        .await;
    assert!(matches!(
        result,
        Err(MembershipServiceError::SelfRemoval {
            board: BOARD,
            user: OWNER,
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_logs_even_when_the_user_was_not_a_member(#[future] harness: Harness) {
    let harness = harness.await;

    let removed = harness
        .service
        .remove_member(OWNER, BOARD, MEMBER, &RequestContext::absent())
        .await
        .expect("remove should succeed");
    assert!(removed);

    let absent = harness
        .service
        .remove_member(OWNER, BOARD, STRANGER, &RequestContext::absent())
        .await
        .expect("remove of a non-member should succeed");
    assert!(!absent);

    let entries = harness.activity.all_entries().expect("log reads");
    assert_eq!(entries.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_listing_is_member_gated(#[future] harness: Harness) {
    let harness = harness.await;

    let members = harness
        .service
        .members_of_board(MEMBER, BOARD)
        .await
        .expect("member listing should succeed");
    assert_eq!(members.len(), 2);

    let denied = harness.service.members_of_board(STRANGER, BOARD).await;
    assert!(matches!(denied, Err(MembershipServiceError::Forbidden(_))));
}
