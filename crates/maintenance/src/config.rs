use shared_types::{AppConfig, MaintenanceSettings};
use std::sync::{LazyLock, OnceLock};

static SETTINGS: OnceLock<MaintenanceSettings> = OnceLock::new();

static DEFAULT_SETTINGS: LazyLock<MaintenanceSettings> = LazyLock::new(MaintenanceSettings::default);

/// Config file read when `MAINTENANCE_CONFIG` is unset.
const CONFIG_PATH: &str = "config.toml";

/// Env var naming an alternate config file.
const CONFIG_PATH_ENV: &str = "MAINTENANCE_CONFIG";

/// Parse the contents of a config file.
pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Read the config file and store its `[maintenance]` table in the global
/// `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file leaves every setting at its default.
pub fn load_settings() -> &'static MaintenanceSettings {
    SETTINGS.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(contents) => match parse_config(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path, settings = ?config.maintenance, "Loaded maintenance settings");
                    config.maintenance
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Failed to parse config, using defaults");
                    MaintenanceSettings::default()
                }
            },
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Config file not readable, using defaults");
                MaintenanceSettings::default()
            }
        }
    })
}

/// The loaded settings, or defaults if `load_settings()` hasn't run.
pub fn settings() -> &'static MaintenanceSettings {
    SETTINGS.get().unwrap_or(&DEFAULT_SETTINGS)
}
