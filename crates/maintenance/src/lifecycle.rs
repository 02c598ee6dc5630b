//! Record workflow: draft, hand-off to a contractor, completion.

use shared_types::{
    AppError, LocalToken, MaintenanceRecord, MaintenanceSettings, RecordData, RecordId,
    RecordStatus, SystemRef, REQUEST_STATUS_PENDING,
};

use crate::config::settings;
use crate::record_mapping::default_record_data;

/// A fresh draft for `system`, identified by a local token until saved.
pub fn new_draft_record(property_id: &str, system: &SystemRef, now_millis: u64) -> MaintenanceRecord {
    new_draft_record_with(property_id, system, now_millis, settings())
}

/// [`new_draft_record`] with explicit settings.
pub fn new_draft_record_with(
    property_id: &str,
    system: &SystemRef,
    now_millis: u64,
    settings: &MaintenanceSettings,
) -> MaintenanceRecord {
    MaintenanceRecord {
        id: Some(RecordId::Pending(LocalToken::new(now_millis))),
        property_id: Some(property_id.to_string()),
        system_id: system.to_string(),
        record_status: Some(RecordStatus::Draft),
        data: default_record_data(settings),
        ..MaintenanceRecord::default()
    }
}

/// Explicit status first; otherwise a pending contractor request implies
/// `ContractorPending`.
pub fn infer_record_status(explicit: Option<RecordStatus>, data: &RecordData) -> Option<RecordStatus> {
    explicit.or_else(|| data.is_request_pending().then_some(RecordStatus::ContractorPending))
}

pub fn record_status_of(record: &MaintenanceRecord) -> Option<RecordStatus> {
    infer_record_status(record.record_status, &record.data)
}

pub fn is_read_only(record: &MaintenanceRecord) -> bool {
    record_status_of(record).is_some_and(|s| s.is_read_only())
}

/// Fails with `Conflict` when the record is locked.
pub fn ensure_editable(record: &MaintenanceRecord) -> Result<(), AppError> {
    if is_read_only(record) {
        return Err(AppError::conflict(format!(
            "Maintenance record {} is awaiting a contractor and cannot be edited",
            display_id(record)
        )));
    }
    Ok(())
}

/// Hand the record to its contractor; it stays read-only until they respond.
pub fn submit_to_contractor(record: &mut MaintenanceRecord) -> Result<(), AppError> {
    ensure_editable(record)?;
    let has_contact = record.data.contractor_email.as_deref().is_some_and(|e| !e.trim().is_empty())
        || record.data.contractor_phone.as_deref().is_some_and(|p| !p.trim().is_empty());
    if !has_contact {
        return Err(AppError::invalid_field(
            "contractorEmail",
            "A contractor email or phone is required to send a request",
        ));
    }
    record.record_status = Some(RecordStatus::ContractorPending);
    record.data.request_status = Some(REQUEST_STATUS_PENDING.to_string());
    tracing::info!(record = %display_id(record), system = %record.system_id, "Record sent to contractor");
    Ok(())
}

pub fn mark_user_completed(record: &mut MaintenanceRecord) -> Result<(), AppError> {
    ensure_editable(record)?;
    record.record_status = Some(RecordStatus::UserCompleted);
    Ok(())
}

fn display_id(record: &MaintenanceRecord) -> String {
    record
        .id
        .as_ref()
        .map(RecordId::to_string)
        .unwrap_or_else(|| "(unsaved)".to_string())
}
