//! Applying a sync plan against the maintenance REST endpoints.

use shared_types::{
    AppError, BackendMaintenanceRecord, MaintenanceRecordPayload, SyncFailure, SyncOperation,
    SyncPlan, SyncReport,
};

/// The maintenance record endpoints the sync needs.
#[allow(async_fn_in_trait)]
pub trait MaintenanceApi {
    async fn create_record(
        &self,
        payload: &MaintenanceRecordPayload,
    ) -> Result<BackendMaintenanceRecord, AppError>;

    async fn update_record(
        &self,
        id: i64,
        payload: &MaintenanceRecordPayload,
    ) -> Result<BackendMaintenanceRecord, AppError>;

    async fn delete_record(&self, id: i64) -> Result<(), AppError>;
}

/// Run creates, then updates, then deletes, one call at a time.
///
/// A failed call is recorded in the report and the rest of the plan still runs.
#[tracing::instrument(skip(api, plan), fields(operations = plan.operation_count()))]
pub async fn apply_sync_plan<A: MaintenanceApi>(api: &A, plan: &SyncPlan) -> SyncReport {
    let mut report = SyncReport::default();

    for payload in &plan.to_create {
        match api.create_record(payload).await {
            Ok(row) => {
                tracing::info!(id = row.id, system = %payload.system_key, "Maintenance record created");
                report.created.push(row.id);
            }
            Err(e) => {
                tracing::warn!(system = %payload.system_key, error = %e, "Failed to create maintenance record");
                report.failures.push(SyncFailure {
                    operation: SyncOperation::Create,
                    id: None,
                    error: e,
                });
            }
        }
    }

    for update in &plan.to_update {
        match api.update_record(update.id, &update.payload).await {
            Ok(_) => report.updated.push(update.id),
            Err(e) => {
                tracing::warn!(id = update.id, error = %e, "Failed to update maintenance record");
                report.failures.push(SyncFailure {
                    operation: SyncOperation::Update,
                    id: Some(update.id),
                    error: e,
                });
            }
        }
    }

    for &id in &plan.to_delete {
        match api.delete_record(id).await {
            Ok(()) => {
                tracing::info!(id, "Maintenance record deleted");
                report.deleted.push(id);
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to delete maintenance record");
                report.failures.push(SyncFailure {
                    operation: SyncOperation::Delete,
                    id: Some(id),
                    error: e,
                });
            }
        }
    }

    if !report.is_clean() {
        tracing::warn!(failures = report.failures.len(), "Maintenance sync finished with failures");
    }
    report
}
