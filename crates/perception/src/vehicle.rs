//! Vehicle state, camera calibration and location

use serde::{Deserialize, Serialize};

use crate::sign::Market;

/// m/s to mph
pub const MPS_TO_MPH: f32 = 2.23694;

/// m/s to km/h
pub const MPS_TO_KMH: f32 = 3.6;

/// Display unit for speeds. Everything internal is meters/second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    MetersPerSecond,
    MilesPerHour,
    KilometersPerHour,
}

impl SpeedUnit {
    /// Unit printed on the market's road signs
    pub fn for_market(market: Market) -> Self {
        match market {
            Market::Us => SpeedUnit::MilesPerHour,
            Market::China => SpeedUnit::KilometersPerHour,
        }
    }

    pub fn from_mps(&self, speed_mps: f32) -> f32 {
        match self {
            SpeedUnit::MetersPerSecond => speed_mps,
            SpeedUnit::MilesPerHour => speed_mps * MPS_TO_MPH,
            SpeedUnit::KilometersPerHour => speed_mps * MPS_TO_KMH,
        }
    }

    /// Converted and rounded to the nearest whole unit
    pub fn whole_from_mps(&self, speed_mps: f32) -> u32 {
        self.from_mps(speed_mps).max(0.0).round() as u32
    }
}

/// Vehicle motion estimated by the perception engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Ground speed (m/s)
    pub speed_mps: f32,
    /// Longitudinal acceleration (m/s^2)
    #[serde(default)]
    pub acceleration: f32,
    /// Yaw rate (rad/s)
    #[serde(default)]
    pub yaw_rate: f32,
    pub timestamp_ms: u64,
}

/// Camera calibration progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProgress {
    pub is_calibrated: bool,
    /// Fraction in [0, 1]
    pub progress: f32,
}

impl CalibrationProgress {
    /// Whole percentage shown on the calibration label
    pub fn percent(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).ceil() as u8
    }
}

/// Camera parameters reported by the perception engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub is_calibrated: bool,
    pub calibration_progress: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub roll: f32,
    #[serde(default)]
    pub height_m: f32,
}

impl Camera {
    pub fn calibration(&self) -> CalibrationProgress {
        CalibrationProgress {
            is_calibrated: self.is_calibrated,
            progress: self.calibration_progress,
        }
    }
}

/// GPS fix. Speed comes from [`VehicleState`] only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((SpeedUnit::MilesPerHour.from_mps(10.0) - 22.3694).abs() < 1e-3);
        assert!((SpeedUnit::KilometersPerHour.from_mps(10.0) - 36.0).abs() < 1e-3);
        assert_eq!(SpeedUnit::MetersPerSecond.from_mps(10.0), 10.0);
    }

    #[test]
    fn test_whole_units_round() {
        // 25 mph posted limit arrives as ~11.176 m/s
        assert_eq!(SpeedUnit::MilesPerHour.whole_from_mps(11.176), 25);
        assert_eq!(SpeedUnit::KilometersPerHour.whole_from_mps(13.889), 50);
        assert_eq!(SpeedUnit::MilesPerHour.whole_from_mps(-1.0), 0);
    }

    #[test]
    fn test_unit_for_market() {
        assert_eq!(SpeedUnit::for_market(Market::Us), SpeedUnit::MilesPerHour);
        assert_eq!(SpeedUnit::for_market(Market::China), SpeedUnit::KilometersPerHour);
    }

    #[test]
    fn test_calibration_percent_rounds_up() {
        let progress = CalibrationProgress {
            is_calibrated: false,
            progress: 0.421,
        };
        assert_eq!(progress.percent(), 43);

        let done = CalibrationProgress {
            is_calibrated: true,
            progress: 1.0,
        };
        assert_eq!(done.percent(), 100);
    }

    #[test]
    fn test_location_carries_position_only() {
        let json = serde_json::to_value(Location::new(37.78, -122.41)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"latitude") && keys.contains(&"longitude"));
    }
}
