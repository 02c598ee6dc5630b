//! Property-wide roll-up of system statuses

use maintenance::status::summarize_property;
use pretty_assertions::assert_eq;
use shared_types::{CustomSystemsData, PropertyFormData, StandardSystem, SystemRef};

use crate::common::{event, today};

#[test]
fn summary_splits_attention_and_scheduled() {
    let form = PropertyFormData::new()
        .with("roofLastInspection", "2026-04-01")
        .with("roofCondition", "Poor")
        .with("hvacLastInspection", "2026-05-01")
        .with("hvacCondition", "Good")
        .with("plumbingLastInspection", "2026-05-01");
    let systems = vec![
        SystemRef::Standard(StandardSystem::Roof),
        SystemRef::Standard(StandardSystem::Hvac),
        SystemRef::Standard(StandardSystem::Plumbing),
        SystemRef::Standard(StandardSystem::Electrical),
        SystemRef::Standard(StandardSystem::Chimney),
    ];
    let new_installs = vec![SystemRef::Standard(StandardSystem::Chimney)];
    let events = vec![event("roof", "2026-11-01", Some("09:00"), "scheduled")];

    let summary = summarize_property(
        &form,
        &systems,
        &new_installs,
        &CustomSystemsData::new(),
        &events,
        today(),
    );

    assert_eq!(summary.total_systems, 5);
    assert_eq!(
        summary.needs_attention,
        vec![
            SystemRef::Standard(StandardSystem::Roof),
            SystemRef::Standard(StandardSystem::Electrical),
        ]
    );
    assert_eq!(summary.scheduled_count(), 1);
    assert_eq!(summary.scheduled[0].scheduled_time.as_deref(), Some("09:00"));
    assert_eq!(
        summary.unscheduled_attention(),
        vec![&SystemRef::Standard(StandardSystem::Electrical)]
    );
}

#[test]
fn empty_property_summary() {
    let summary = summarize_property(
        &PropertyFormData::new(),
        &[],
        &[],
        &CustomSystemsData::new(),
        &[],
        today(),
    );
    assert_eq!(summary.total_systems, 0);
    assert_eq!(summary.attention_count(), 0);
}
