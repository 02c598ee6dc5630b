//! Editor -> backend -> editor preserves what the editor shows

use maintenance::record_mapping::{from_backend_payload, to_backend_payload};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::MaintenanceRecord;

use crate::common::{stored_row, ui_record};

#[test]
fn roundtrip_preserves_system_dates_and_data() {
    let original = ui_record(json!("MT-1700000000000"));
    let payload = to_backend_payload(&original, "1").unwrap();
    let restored = from_backend_payload(&stored_row(77, &payload));

    assert_eq!(restored.system_id, original.system_id);
    assert_eq!(restored.date, original.date);
    assert_eq!(restored.next_service_date, original.next_service_date);
    assert_eq!(restored.data, original.data);
    assert_eq!(restored.record_status, original.record_status);
}

#[test]
fn roundtrip_keeps_unknown_data_keys() {
    let original: MaintenanceRecord = serde_json::from_value(json!({
        "systemId": "custom-well-pump-0",
        "date": "2026-07-04",
        "data": {"warrantyMonths": 18, "tags": ["annual"]}
    }))
    .unwrap();
    let payload = to_backend_payload(&original, "1").unwrap();
    let restored = from_backend_payload(&stored_row(4, &payload));

    assert_eq!(restored.data.extra.get("warrantyMonths"), Some(&json!(18)));
    assert_eq!(restored.data.extra.get("tags"), Some(&json!(["annual"])));
    assert_eq!(restored.data.priority.as_deref(), Some("Medium"));
}
