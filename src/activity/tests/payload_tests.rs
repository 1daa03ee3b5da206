//! Unit tests for the typed activity payload union.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code indexes JSON values that default to null when absent"
)]

use crate::activity::domain::{ActivityPayload, EntityKind};
use crate::board::domain::{ColumnId, CommentId, TaskId, UserId};
use rstest::rstest;
use serde_json::json;

fn sample_move() -> ActivityPayload {
    ActivityPayload::TaskMoved {
        task_id: TaskId::new(7),
        title: "Ship it".to_owned(),
        from_column_id: ColumnId::new(1),
        from_column_name: "Todo".to_owned(),
        to_column_id: ColumnId::new(2),
        to_column_name: "Done".to_owned(),
        new_position: 0,
    }
}

#[rstest]
fn serialized_payload_carries_the_action_tag() {
    let value = serde_json::to_value(sample_move()).expect("serialize");
    assert_eq!(value["action"], json!("task.moved"));
    assert_eq!(value["task_id"], json!(7));
    assert_eq!(value["from_column_name"], json!("Todo"));
    assert_eq!(value["new_position"], json!(0));
}

#[rstest]
fn payload_round_trips_through_json() {
    let payload = sample_move();
    let value = serde_json::to_value(&payload).expect("serialize");
    let back: ActivityPayload = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, payload);
}

#[rstest]
fn action_accessor_matches_the_serde_tag() {
    let payloads = [
        ActivityPayload::ColumnMoved { from: 0, to: 2 },
        ActivityPayload::CommentAdded {
            task_id: TaskId::new(3),
            title: "t".to_owned(),
            column_id: ColumnId::new(1),
            column_name: "Todo".to_owned(),
            comment_id: CommentId::new(5),
            body_preview: "hi".to_owned(),
        },
        ActivityPayload::MemberAdded {
            user_id: UserId::new(4),
        },
        ActivityPayload::FriendRequestSent {
            addressee_id: UserId::new(8),
        },
    ];
    for payload in payloads {
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["action"], json!(payload.action()));
    }
}

#[rstest]
#[case::board(ActivityPayload::BoardCreated { name: "b".to_owned() }, EntityKind::Board)]
#[case::column(ActivityPayload::ColumnMoved { from: 1, to: 0 }, EntityKind::Column)]
#[case::member(
    ActivityPayload::MemberRemoved { user_id: UserId::new(2) },
    EntityKind::Member
)]
#[case::friend(
    ActivityPayload::FriendRemoved { user_id: UserId::new(2) },
    EntityKind::Friend
)]
fn entity_kind_is_derived_from_the_payload(
    #[case] payload: ActivityPayload,
    #[case] kind: EntityKind,
) {
    assert_eq!(payload.entity_kind(), kind);
}

#[rstest]
fn task_id_is_exposed_for_task_scoped_payloads() {
    assert_eq!(sample_move().task_id(), Some(TaskId::new(7)));
    let comment = ActivityPayload::CommentAdded {
        task_id: TaskId::new(11),
        title: "t".to_owned(),
        column_id: ColumnId::new(1),
        column_name: "Todo".to_owned(),
        comment_id: CommentId::new(5),
        body_preview: "hi".to_owned(),
    };
    assert_eq!(comment.task_id(), Some(TaskId::new(11)));
    assert_eq!(
        ActivityPayload::ColumnMoved { from: 0, to: 1 }.task_id(),
        None
    );
}

#[rstest]
fn unknown_action_tags_fail_to_deserialize() {
    let value = json!({ "action": "task.exploded", "task_id": 1 });
    assert!(serde_json::from_value::<ActivityPayload>(value).is_err());
}
