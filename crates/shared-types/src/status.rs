use serde::{Deserialize, Serialize};

use crate::system::SystemRef;

/// Derived maintenance status of one system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub needs_attention: bool,
    pub has_scheduled_event: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

/// A system with an upcoming visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSystem {
    pub system: SystemRef,
    pub scheduled_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

/// Dashboard roll-up of every system on a property.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMaintenanceSummary {
    pub total_systems: usize,
    pub needs_attention: Vec<SystemRef>,
    pub scheduled: Vec<ScheduledSystem>,
}

impl PropertyMaintenanceSummary {
    pub fn attention_count(&self) -> usize {
        self.needs_attention.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Systems that need attention and have nothing booked yet.
    pub fn unscheduled_attention(&self) -> Vec<&SystemRef> {
        self.needs_attention
            .iter()
            .filter(|system| !self.scheduled.iter().any(|s| &s.system == *system))
            .collect()
    }
}
