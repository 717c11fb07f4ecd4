//! Application configuration

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use telemetry::TelemetryConfig;

use crate::coordinator::CoordinatorConfig;
use crate::logging::LoggingConfig;
use crate::CoordinatorError;

/// Environment variables override file values, e.g.
/// `OVERLAY__COORDINATOR__SIGN_POLL_INTERVAL_MS=500`.
pub const ENV_PREFIX: &str = "OVERLAY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub coordinator: CoordinatorConfig,
    pub telemetry: TelemetryConfig,
    pub logging: LoggingConfig,
    /// Prometheus exporter listen address, disabled when unset
    pub metrics_addr: Option<String>,
}

impl AppConfig {
    /// Load from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self, CoordinatorError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.coordinator.tracker_capacity, 5);
        assert_eq!(config.coordinator.sign_poll_interval_ms, 1000);
        assert_eq!(config.coordinator.alerts.speed_limit_cooldown_ms, 5000);
        assert_eq!(config.coordinator.alerts.collision_cooldown_ms, 3000);
        assert!(!config.telemetry.enabled);
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn test_load_partial_toml() {
        let path = std::env::temp_dir().join(format!("overlay-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[coordinator]\nsign_poll_interval_ms = 250\n\n[coordinator.alerts]\ncollision_cooldown_ms = 1000\n\n[telemetry]\nvehicle_id = \"cc304s\"\n\n[logging]\njson = true"
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.coordinator.sign_poll_interval_ms, 250);
        assert_eq!(config.coordinator.tracker_capacity, 5);
        assert_eq!(config.coordinator.alerts.collision_cooldown_ms, 1000);
        assert_eq!(config.coordinator.alerts.speed_limit_cooldown_ms, 5000);
        assert_eq!(config.telemetry.vehicle_id, "cc304s");
        assert!(config.logging.json);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/overlay.toml")));
        assert!(matches!(result, Err(CoordinatorError::Config(_))));
    }
}
