//! System status derivation.
//!
//! A system needs attention when it has never been inspected (and isn't a
//! new install), is rated Poor or Fair, or has open issues. It counts as
//! scheduled when a booked maintenance event or the form's own next
//! inspection date lies today or later; a booked event wins over the form.

use chrono::{Local, NaiveDate};
use shared_types::{
    CustomSystemsData, InspectionFields, MaintenanceEvent, MaintenanceSettings,
    PropertyFormData, PropertyMaintenanceSummary, ScheduledSystem, SystemRef, SystemStatus,
};

use crate::config::settings;
use crate::dates::{is_upcoming, parse_loose_date};

/// Inspection fields for `system`, from the flat form or the custom map.
///
/// A custom system with no entry yields empty fields.
pub fn resolve_inspection_fields(
    form: &PropertyFormData,
    system: &SystemRef,
    custom_systems: &CustomSystemsData,
) -> InspectionFields {
    match system {
        SystemRef::Standard(standard) => InspectionFields::from_form(form, standard.field_names()),
        SystemRef::Custom { name, .. } => custom_systems.get(name).cloned().unwrap_or_default(),
    }
}

pub fn needs_attention(fields: &InspectionFields, is_new_install: bool) -> bool {
    let never_inspected = !is_new_install && !fields.new_install && fields.last_inspection().is_none();
    let poor_condition = fields.condition.is_some_and(|c| c.needs_attention());
    never_inspected || poor_condition || fields.issues().is_some()
}

/// Booked events for `system` on or after `today`, earliest first.
pub fn upcoming_events_for<'a>(
    system: &SystemRef,
    events: &'a [MaintenanceEvent],
    today: NaiveDate,
    settings: &MaintenanceSettings,
) -> Vec<&'a MaintenanceEvent> {
    let key = system.to_string();
    let mut upcoming: Vec<(NaiveDate, &MaintenanceEvent)> = events
        .iter()
        .filter(|e| e.system_key == key && settings.counts_as_upcoming(e.status.as_str()))
        .filter_map(|e| parse_loose_date(&e.scheduled_date).map(|d| (d, e)))
        .filter(|(d, _)| *d >= today)
        .collect();
    upcoming.sort_by(|(a_date, a), (b_date, b)| {
        a_date
            .cmp(b_date)
            .then_with(|| a.scheduled_time.cmp(&b.scheduled_time))
    });
    upcoming.into_iter().map(|(_, e)| e).collect()
}

/// Derive attention and scheduling status for one system.
pub fn get_system_status(
    form: &PropertyFormData,
    system: &SystemRef,
    is_new_install: bool,
    custom_systems: &CustomSystemsData,
    events: &[MaintenanceEvent],
    today: NaiveDate,
) -> SystemStatus {
    get_system_status_with(form, system, is_new_install, custom_systems, events, today, settings())
}

/// [`get_system_status`] with explicit settings.
pub fn get_system_status_with(
    form: &PropertyFormData,
    system: &SystemRef,
    is_new_install: bool,
    custom_systems: &CustomSystemsData,
    events: &[MaintenanceEvent],
    today: NaiveDate,
    settings: &MaintenanceSettings,
) -> SystemStatus {
    let fields = resolve_inspection_fields(form, system, custom_systems);
    let needs_attention = needs_attention(&fields, is_new_install);

    if let Some(event) = upcoming_events_for(system, events, today, settings).first() {
        return SystemStatus {
            needs_attention,
            has_scheduled_event: true,
            scheduled_date: Some(event.scheduled_date.clone()),
            scheduled_time: event.scheduled_time.clone(),
        };
    }

    match fields.next_inspection().filter(|d| is_upcoming(d, today)) {
        Some(next) => SystemStatus {
            needs_attention,
            has_scheduled_event: true,
            scheduled_date: Some(next.to_string()),
            scheduled_time: None,
        },
        None => SystemStatus {
            needs_attention,
            ..SystemStatus::default()
        },
    }
}

/// [`get_system_status`] against the local calendar date.
pub fn get_system_status_today(
    form: &PropertyFormData,
    system: &SystemRef,
    is_new_install: bool,
    custom_systems: &CustomSystemsData,
    events: &[MaintenanceEvent],
) -> SystemStatus {
    let today = Local::now().date_naive();
    get_system_status(form, system, is_new_install, custom_systems, events, today)
}

/// Roll up every system on a property. `new_installs` lists systems
/// installed with the property.
pub fn summarize_property(
    form: &PropertyFormData,
    systems: &[SystemRef],
    new_installs: &[SystemRef],
    custom_systems: &CustomSystemsData,
    events: &[MaintenanceEvent],
    today: NaiveDate,
) -> PropertyMaintenanceSummary {
    summarize_property_with(form, systems, new_installs, custom_systems, events, today, settings())
}

/// [`summarize_property`] with explicit settings.
pub fn summarize_property_with(
    form: &PropertyFormData,
    systems: &[SystemRef],
    new_installs: &[SystemRef],
    custom_systems: &CustomSystemsData,
    events: &[MaintenanceEvent],
    today: NaiveDate,
    settings: &MaintenanceSettings,
) -> PropertyMaintenanceSummary {
    let mut summary = PropertyMaintenanceSummary {
        total_systems: systems.len(),
        ..PropertyMaintenanceSummary::default()
    };
    for system in systems {
        let is_new_install = new_installs.contains(system);
        let status =
            get_system_status_with(form, system, is_new_install, custom_systems, events, today, settings);
        if status.needs_attention {
            summary.needs_attention.push(system.clone());
        }
        if let (true, Some(date)) = (status.has_scheduled_event, status.scheduled_date) {
            summary.scheduled.push(ScheduledSystem {
                system: system.clone(),
                scheduled_date: date,
                scheduled_time: status.scheduled_time,
            });
        }
    }
    tracing::debug!(
        total = summary.total_systems,
        attention = summary.attention_count(),
        scheduled = summary.scheduled_count(),
        "Summarized property systems"
    );
    summary
}
