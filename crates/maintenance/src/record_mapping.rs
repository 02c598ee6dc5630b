//! Mapping between editor records and backend payloads, plus sync planning.

use std::collections::HashSet;

use shared_types::{
    AppError, BackendMaintenanceRecord, MaintenanceRecord, MaintenanceRecordPayload,
    MaintenanceSettings, PendingUpdate, RecordData, RecordId, RecordStatus, SyncPlan,
    DEFAULT_MAX_FIELD_LEN,
};
use validator::Validate;

use crate::config::settings;
use crate::dates::{format_iso_date, format_iso_datetime};
use crate::lifecycle::infer_record_status;

/// Parse the property id the backend expects.
pub fn parse_property_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::invalid_field(
            "property_id",
            format!("Property id must be an integer, got {raw:?}"),
        )
    })
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Build the create/update body for `record`.
pub fn to_backend_payload(
    record: &MaintenanceRecord,
    property_id: &str,
) -> Result<MaintenanceRecordPayload, AppError> {
    to_backend_payload_with(record, property_id, settings())
}

/// [`to_backend_payload`] with explicit settings. `max_field_len` is capped
/// at the backend column width.
pub fn to_backend_payload_with(
    record: &MaintenanceRecord,
    property_id: &str,
    settings: &MaintenanceSettings,
) -> Result<MaintenanceRecordPayload, AppError> {
    let property_id = parse_property_id(property_id)?;
    let max_len = settings.max_field_len.min(DEFAULT_MAX_FIELD_LEN);

    let mut data = record.data.clone();
    fill_priority(&mut data, settings);

    let payload = MaintenanceRecordPayload {
        property_id,
        system_key: truncate_chars(&record.system_id, max_len),
        completed_at: record.date.as_deref().and_then(format_iso_datetime),
        next_service_date: record.next_service_date.as_deref().and_then(format_iso_date),
        status: truncate_chars(&record.status, max_len),
        record_status: record.record_status,
        data,
    };
    payload.validate()?;
    Ok(payload)
}

/// Rebuild the editor shape from a backend row.
pub fn from_backend_payload(row: &BackendMaintenanceRecord) -> MaintenanceRecord {
    from_backend_payload_with(row, settings())
}

/// [`from_backend_payload`] with explicit settings.
pub fn from_backend_payload_with(
    row: &BackendMaintenanceRecord,
    settings: &MaintenanceSettings,
) -> MaintenanceRecord {
    let mut data = row.data.clone().unwrap_or_default();
    fill_priority(&mut data, settings);
    let explicit = row.record_status.as_deref().and_then(RecordStatus::from_str_opt);
    MaintenanceRecord {
        id: Some(RecordId::Persisted(row.id)),
        property_id: row.property_id.map(|id| id.to_string()),
        system_id: row.system_key.clone(),
        date: row.completed_at.as_deref().and_then(format_iso_date),
        next_service_date: row.next_service_date.as_deref().and_then(format_iso_date),
        status: row.status.clone().unwrap_or_default(),
        record_status: infer_record_status(explicit, &data),
        data,
    }
}

pub fn from_backend_list(rows: &[BackendMaintenanceRecord]) -> Vec<MaintenanceRecord> {
    let settings = settings();
    rows.iter().map(|row| from_backend_payload_with(row, settings)).collect()
}

/// True for records the backend has never seen.
pub fn is_new_record(record: &MaintenanceRecord) -> bool {
    match &record.id {
        None => true,
        Some(id) => id.is_pending(),
    }
}

/// Persisted ids in load order; captured so later omissions become deletes.
pub fn original_ids(records: &[MaintenanceRecord]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.id.as_ref().and_then(RecordId::persisted))
        .collect()
}

/// Partition `current` into creates and updates, and delete every original
/// id that no longer appears.
pub fn compute_sync_plan(
    current: &[MaintenanceRecord],
    original_ids: &[i64],
    property_id: &str,
) -> Result<SyncPlan, AppError> {
    compute_sync_plan_with(current, original_ids, property_id, settings())
}

/// [`compute_sync_plan`] with explicit settings.
pub fn compute_sync_plan_with(
    current: &[MaintenanceRecord],
    original_ids: &[i64],
    property_id: &str,
    settings: &MaintenanceSettings,
) -> Result<SyncPlan, AppError> {
    let mut plan = SyncPlan::default();
    let mut kept = HashSet::new();

    for record in current {
        let payload = to_backend_payload_with(record, property_id, settings)?;
        match record.id.as_ref().and_then(RecordId::persisted) {
            Some(id) => {
                kept.insert(id);
                plan.to_update.push(PendingUpdate { id, payload });
            }
            None => plan.to_create.push(payload),
        }
    }

    let mut seen = HashSet::new();
    plan.to_delete = original_ids
        .iter()
        .copied()
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .collect();

    tracing::debug!(
        property_id,
        create = plan.to_create.len(),
        update = plan.to_update.len(),
        delete = plan.to_delete.len(),
        "Computed maintenance sync plan"
    );
    Ok(plan)
}

/// An empty `RecordData` with the configured default priority.
pub fn default_record_data(settings: &MaintenanceSettings) -> RecordData {
    RecordData {
        priority: Some(settings.default_priority.clone()),
        ..RecordData::default()
    }
}

fn fill_priority(data: &mut RecordData, settings: &MaintenanceSettings) {
    if data.priority.is_none() {
        data.priority = Some(settings.default_priority.clone());
    }
}
