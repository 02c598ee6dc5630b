use serde::{Deserialize, Serialize};

/// Backend column limit for `system_key` and `status`.
pub const DEFAULT_MAX_FIELD_LEN: usize = 50;

/// Priority assigned to records that arrive without one.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Tunables for the maintenance helpers.
///
/// Loaded from the `[maintenance]` table of `config.toml`. Every field
/// falls back to its default so a missing or partial file is still usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaintenanceSettings {
    pub max_field_len: usize,
    pub default_priority: String,
    /// Event statuses that count as an upcoming booking.
    pub upcoming_statuses: Vec<String>,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            default_priority: DEFAULT_PRIORITY.to_string(),
            upcoming_statuses: vec!["scheduled".to_string(), "confirmed".to_string()],
        }
    }
}

impl MaintenanceSettings {
    pub fn counts_as_upcoming(&self, status: &str) -> bool {
        self.upcoming_statuses.iter().any(|s| s == status)
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub maintenance: MaintenanceSettings,
}
