//! Telemetry reports and their wire envelope

use chrono::{SecondsFormat, Utc};
use perception::{Location, SpeedRestriction, SpeedUnit};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::TelemetryError;

/// Report produced by the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryReport {
    /// A new speed-limit state was presented
    SpeedReport {
        vehicle_speed_mps: f32,
        speed_limit: SpeedRestriction,
        location: Location,
    },
    /// Restriction update from the safety engine
    SpeedSample {
        /// `None` before the first vehicle state
        current_speed_mps: Option<f32>,
        speed_limit_mps: f32,
    },
    /// Sign shown during a sign-detection poll
    SignReport {
        sign_name: String,
        school_zone: bool,
        location: Location,
        /// `None` before the first vehicle state
        speed_mps: Option<f32>,
    },
}

impl TelemetryReport {
    /// Message class on the wire
    pub fn class(&self) -> &'static str {
        match self {
            TelemetryReport::SpeedReport { .. } => "driver",
            TelemetryReport::SpeedSample { .. } => "speedData",
            TelemetryReport::SignReport { .. } => "trafficData",
        }
    }

    /// Class-specific payload. Imperial speeds are mph, metric are m/s.
    pub fn data(&self) -> Value {
        let mph = SpeedUnit::MilesPerHour;
        match self {
            TelemetryReport::SpeedReport {
                vehicle_speed_mps,
                speed_limit,
                location,
            } => json!({
                "speed": mph.from_mps(*vehicle_speed_mps),
                "speedMetric": vehicle_speed_mps,
                "speedLimit": mph.whole_from_mps(speed_limit.max_mps),
                "speedLimitMetric": speed_limit.max_mps,
                "location": location_json(location),
            }),
            TelemetryReport::SpeedSample {
                current_speed_mps,
                speed_limit_mps,
            } => json!({
                "speed": current_speed_mps.map(|s| mph.from_mps(s)),
                "speedMetric": current_speed_mps,
                "speedLimit": mph.whole_from_mps(*speed_limit_mps),
                "speedLimitMetric": speed_limit_mps,
            }),
            TelemetryReport::SignReport {
                sign_name,
                school_zone,
                location,
                speed_mps,
            } => json!({
                "sign": sign_name,
                "school-zone": school_zone,
                "location": location_json(location),
                "speed": speed_mps.map(|s| mph.from_mps(s)),
                "speedMetric": speed_mps,
            }),
        }
    }
}

fn location_json(location: &Location) -> Value {
    json!({
        "longitude": location.longitude,
        "latitude": location.latitude,
    })
}

/// Message published to the broker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEnvelope {
    pub message_id: Uuid,
    pub vehicle_id: String,
    pub class: String,
    /// RFC 3339, millisecond precision
    pub timestamp: String,
    pub data: Value,
}

impl TelemetryEnvelope {
    /// Wrap a report, timestamped now
    pub fn new(vehicle_id: &str, report: &TelemetryReport) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            vehicle_id: vehicle_id.to_string(),
            class: report.class().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data: report.data(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TelemetryError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new(37.78, -122.41)
    }

    #[test]
    fn test_speed_sample_formats_both_units() {
        let report = TelemetryReport::SpeedSample {
            current_speed_mps: Some(10.0),
            speed_limit_mps: 11.176,
        };
        let data = report.data();

        assert_eq!(report.class(), "speedData");
        assert_eq!(data["speedLimit"], 25);
        assert!((data["speed"].as_f64().unwrap() - 22.3694).abs() < 1e-3);
        assert!((data["speedMetric"].as_f64().unwrap() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_sample_unknown_speed_is_null() {
        let report = TelemetryReport::SpeedSample {
            current_speed_mps: None,
            speed_limit_mps: 20.0,
        };
        let data = report.data();
        assert!(data["speed"].is_null());
        assert!(data["speedMetric"].is_null());
    }

    #[test]
    fn test_sign_report_payload() {
        let report = TelemetryReport::SignReport {
            sign_name: "Warning_School_Zone_US".to_string(),
            school_zone: true,
            location: location(),
            speed_mps: Some(0.0),
        };
        let data = report.data();

        assert_eq!(report.class(), "trafficData");
        assert_eq!(data["sign"], "Warning_School_Zone_US");
        assert_eq!(data["school-zone"], true);
        assert!((data["location"]["latitude"].as_f64().unwrap() - 37.78).abs() < 1e-9);
    }

    #[test]
    fn test_envelope_has_fractional_rfc3339_timestamp() {
        let report = TelemetryReport::SpeedReport {
            vehicle_speed_mps: 30.0,
            speed_limit: SpeedRestriction::new(0.0, 25.0),
            location: location(),
        };
        let envelope = TelemetryEnvelope::new("cc304s", &report);
        let json: Value = serde_json::from_slice(&envelope.to_bytes().unwrap()).unwrap();

        assert_eq!(json["class"], "driver");
        assert_eq!(json["vehicle_id"], "cc304s");
        assert_eq!(json["data"]["speedLimit"], 56);

        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.contains('.'));
    }

    #[test]
    fn test_shared_keys_use_same_units_across_classes() {
        let driver = TelemetryReport::SpeedReport {
            vehicle_speed_mps: 10.0,
            speed_limit: SpeedRestriction::new(0.0, 11.176),
            location: location(),
        }
        .data();
        let sample = TelemetryReport::SpeedSample {
            current_speed_mps: Some(10.0),
            speed_limit_mps: 11.176,
        }
        .data();
        let sign = TelemetryReport::SignReport {
            sign_name: "Speed_Limit_25_US".to_string(),
            school_zone: false,
            location: location(),
            speed_mps: Some(10.0),
        }
        .data();

        for key in ["speed", "speedMetric"] {
            assert_eq!(driver[key], sample[key], "{key}");
            assert_eq!(driver[key], sign[key], "{key}");
        }
        for key in ["speedLimit", "speedLimitMetric"] {
            assert_eq!(driver[key], sample[key], "{key}");
        }
        assert_eq!(driver["speedLimit"], 25);
    }
}
