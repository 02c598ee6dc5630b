//! Attention and scheduling derivation per system

use maintenance::status::{get_system_status, get_system_status_with, upcoming_events_for};
use pretty_assertions::assert_eq;
use shared_types::{
    Condition, CustomSystemsData, InspectionFields, MaintenanceEvent, MaintenanceSettings,
    PropertyFormData, StandardSystem, SystemRef, SystemStatus,
};

use crate::common::{event, today};

fn roof() -> SystemRef {
    SystemRef::Standard(StandardSystem::Roof)
}

fn inspected_roof() -> PropertyFormData {
    PropertyFormData::new()
        .with("roofLastInspection", "2026-04-01")
        .with("roofCondition", "Good")
}

fn status(form: &PropertyFormData, system: &SystemRef, new_install: bool) -> SystemStatus {
    get_system_status(form, system, new_install, &CustomSystemsData::new(), &[], today())
}

#[test]
fn poor_or_fair_needs_attention_regardless_of_history() {
    for condition in ["Poor", "Fair", "fair"] {
        let form = inspected_roof().with("roofCondition", condition);
        assert!(status(&form, &roof(), false).needs_attention);
        assert!(status(&form, &roof(), true).needs_attention);
    }
}

#[test]
fn new_install_without_inspection_is_fine() {
    let form = PropertyFormData::new().with("roofCondition", "Excellent");
    let result = status(&form, &roof(), true);
    assert_eq!(result, SystemStatus::default());
}

#[test]
fn missing_inspection_needs_attention_when_not_new() {
    let form = PropertyFormData::new().with("roofLastInspection", "  ");
    assert!(status(&form, &roof(), false).needs_attention);
}

#[test]
fn open_issues_need_attention() {
    let form = inspected_roof().with("roofIssues", "Missing shingles on north face");
    assert!(status(&form, &roof(), false).needs_attention);
}

#[test]
fn healthy_inspected_system_is_quiet() {
    assert!(!status(&inspected_roof(), &roof(), false).needs_attention);
}

#[test]
fn upcoming_event_schedules_even_without_form_date() {
    let events = vec![event("roof", "2026-11-03", Some("10:00"), "scheduled")];
    let result = get_system_status(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
    );
    assert!(result.has_scheduled_event);
    assert_eq!(result.scheduled_date.as_deref(), Some("2026-11-03"));
    assert_eq!(result.scheduled_time.as_deref(), Some("10:00"));
}

#[test]
fn event_takes_precedence_over_form_next_inspection() {
    let form = inspected_roof().with("roofNextInspection", "2026-10-20");
    let events = vec![event("roof", "2026-12-01", None, "confirmed")];
    let result = get_system_status(&form, &roof(), false, &CustomSystemsData::new(), &events, today());
    assert_eq!(result.scheduled_date.as_deref(), Some("2026-12-01"));
    assert_eq!(result.scheduled_time, None);
}

#[test]
fn earliest_matching_event_wins() {
    let events = vec![
        event("roof", "2027-01-10", None, "scheduled"),
        event("hvac", "2026-10-17", None, "scheduled"),
        event("roof", "2026-10-16", Some("15:00"), "confirmed"),
        event("roof", "2026-10-16", Some("08:00"), "scheduled"),
    ];
    let result = get_system_status(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
    );
    assert_eq!(result.scheduled_date.as_deref(), Some("2026-10-16"));
    assert_eq!(result.scheduled_time.as_deref(), Some("08:00"));
}

#[test]
fn past_cancelled_and_malformed_events_are_ignored() {
    let events = vec![
        event("roof", "2026-10-15", None, "scheduled"),
        event("roof", "2026-11-01", None, "cancelled"),
        event("roof", "someday", None, "scheduled"),
    ];
    let result = get_system_status(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
    );
    assert!(!result.has_scheduled_event);
    assert_eq!(result.scheduled_date, None);
}

#[test]
fn form_next_inspection_used_when_no_event() {
    let form = inspected_roof().with("roofNextInspection", "2027-03-15");
    let result = status(&form, &roof(), false);
    assert!(result.has_scheduled_event);
    assert_eq!(result.scheduled_date.as_deref(), Some("2027-03-15"));
}

#[test]
fn past_or_unparseable_next_inspection_is_not_scheduled() {
    for next in ["2026-01-01", "tbd", ""] {
        let form = inspected_roof().with("roofNextInspection", next);
        assert!(!status(&form, &roof(), false).has_scheduled_event, "{next}");
    }
}

#[test]
fn custom_system_reads_custom_data() {
    let mut custom = CustomSystemsData::new();
    custom.insert(
        "solar-panels".to_string(),
        InspectionFields {
            last_inspection: Some("2026-02-01".to_string()),
            next_inspection: Some("2026-12-01".to_string()),
            condition: Some(Condition::Fair),
            ..InspectionFields::default()
        },
    );
    let system = SystemRef::custom("solar-panels", 1);
    let events = vec![event("custom-solar-panels-0", "2026-11-01", None, "scheduled")];
    let result = get_system_status(&PropertyFormData::new(), &system, false, &custom, &events, today());
    assert!(result.needs_attention);
    assert_eq!(result.scheduled_date.as_deref(), Some("2026-12-01"));
}

#[test]
fn custom_new_install_flag_counts() {
    let mut custom = CustomSystemsData::new();
    custom.insert(
        "pool".to_string(),
        InspectionFields {
            new_install: true,
            ..InspectionFields::default()
        },
    );
    let result = get_system_status(
        &PropertyFormData::new(),
        &SystemRef::custom("pool", 0),
        false,
        &custom,
        &[],
        today(),
    );
    assert!(!result.needs_attention);
}

#[test]
fn configured_statuses_control_upcoming_events() {
    let settings = MaintenanceSettings {
        upcoming_statuses: vec!["scheduled".to_string()],
        ..MaintenanceSettings::default()
    };
    let events = vec![event("roof", "2026-11-01", None, "confirmed")];
    assert!(upcoming_events_for(&roof(), &events, today(), &settings).is_empty());
    let result = get_system_status_with(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
        &settings,
    );
    assert!(!result.has_scheduled_event);
}

#[test]
fn event_list_with_null_and_statusless_rows_still_derives() {
    let events: Vec<MaintenanceEvent> = serde_json::from_value(serde_json::json!([
        {"system_key": "roof", "scheduled_date": null, "status": null},
        {"system_key": "roof", "scheduled_date": "2026-11-01"},
        {"system_key": "roof", "scheduled_date": "2026-12-01", "status": "confirmed"}
    ]))
    .unwrap();
    let result = get_system_status(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
    );
    assert!(result.has_scheduled_event);
    assert_eq!(result.scheduled_date.as_deref(), Some("2026-12-01"));
}

#[test]
fn event_without_status_does_not_schedule() {
    let events: Vec<MaintenanceEvent> = serde_json::from_value(serde_json::json!([
        {"system_key": "roof", "scheduled_date": "2026-11-01"}
    ]))
    .unwrap();
    let result = get_system_status(
        &inspected_roof(),
        &roof(),
        false,
        &CustomSystemsData::new(),
        &events,
        today(),
    );
    assert!(!result.has_scheduled_event);
    assert_eq!(result.scheduled_date, None);
}
