//! Telemetry Module
//!
//! Driving telemetry published over MQTT:
//! - Speed reports on new speed-limit states
//! - Speed samples on every known restriction update
//! - Traffic-sign sightings with school-zone status
//!
//! Publishing never blocks the caller; failures are logged and dropped.

pub mod report;
pub mod sink;

pub use report::{TelemetryEnvelope, TelemetryReport};
pub use sink::{LogSink, MqttTelemetrySink, TelemetrySink};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Telemetry error types
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Publish to the broker; when off, reports are only logged
    pub enabled: bool,
    /// MQTT broker host
    pub broker_host: String,
    /// MQTT port
    pub broker_port: u16,
    /// Vehicle ID
    pub vehicle_id: String,
    /// Topics are `{topic_prefix}/{vehicle_id}/{class}`
    pub topic_prefix: String,
    /// MQTT keep-alive (seconds)
    pub keep_alive_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            vehicle_id: "unknown".to_string(),
            topic_prefix: "vehicles".to_string(),
            keep_alive_secs: 30,
        }
    }
}

impl TelemetryConfig {
    pub fn topic(&self, class: &str) -> String {
        format!("{}/{}/{}", self.topic_prefix, self.vehicle_id, class)
    }
}
