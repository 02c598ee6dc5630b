//! Create/update/delete partitioning

use maintenance::record_mapping::{compute_sync_plan, to_backend_payload};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, PendingUpdate};

use crate::common::ui_record;

#[test]
fn mixed_records_partition_into_create_update_delete() {
    let current = vec![ui_record(json!(5)), ui_record(json!("MT-999"))];
    let plan = compute_sync_plan(&current, &[5, 7], "12").unwrap();

    assert_eq!(plan.to_create, vec![to_backend_payload(&current[1], "12").unwrap()]);
    assert_eq!(
        plan.to_update,
        vec![PendingUpdate {
            id: 5,
            payload: to_backend_payload(&current[0], "12").unwrap(),
        }]
    );
    assert_eq!(plan.to_delete, vec![7]);
}

#[test]
fn records_without_id_are_created() {
    let mut record = ui_record(json!(1));
    record.id = None;
    let plan = compute_sync_plan(&[record], &[], "12").unwrap();
    assert_eq!(plan.to_create.len(), 1);
    assert!(plan.to_update.is_empty());
    assert!(plan.to_delete.is_empty());
}

#[test]
fn removing_everything_deletes_all_originals_in_order() {
    let plan = compute_sync_plan(&[], &[9, 3, 9, 4], "12").unwrap();
    assert!(plan.to_create.is_empty());
    assert_eq!(plan.to_delete, vec![9, 3, 4]);
    assert_eq!(plan.operation_count(), 3);
}

#[test]
fn unchanged_set_only_updates() {
    let current = vec![ui_record(json!(1)), ui_record(json!("2"))];
    let plan = compute_sync_plan(&current, &[1, 2], "12").unwrap();
    assert_eq!(plan.to_update.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(plan.to_delete.is_empty());
}

#[test]
fn invalid_property_id_fails_the_plan() {
    let err = compute_sync_plan(&[ui_record(json!(1))], &[1], "twelve").unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
}

#[test]
fn empty_inputs_give_empty_plan() {
    let plan = compute_sync_plan(&[], &[], "not-checked").unwrap();
    assert!(plan.is_empty());
}
