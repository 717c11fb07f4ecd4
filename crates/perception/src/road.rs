//! Road description and restrictions

use serde::{Deserialize, Serialize};

/// Traffic direction of a lane relative to the vehicle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneDirection {
    #[default]
    Forward,
    Backward,
    Reversible,
    Unknown,
}

/// One lane of the road
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Lane width (meters)
    pub width_m: f32,
    pub direction: LaneDirection,
}

/// Lane layout around the vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadDescription {
    /// Lanes, left to right
    pub lanes: Vec<Lane>,

    /// Index of the lane the vehicle occupies
    pub current_lane_index: usize,

    /// Position inside the current lane (0 = left edge, 1 = right edge)
    pub relative_position: f32,
}

/// Legal speed range for the current road segment (meters/second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRestriction {
    pub min_mps: f32,
    pub max_mps: f32,
}

impl SpeedRestriction {
    pub fn new(min_mps: f32, max_mps: f32) -> Self {
        Self { min_mps, max_mps }
    }

    /// Strictly above the upper bound
    pub fn is_exceeded_by(&self, speed_mps: f32) -> bool {
        speed_mps > self.max_mps
    }
}

/// Restrictions reported by the safety engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadRestrictions {
    /// `None` when the engine lost track of the limit
    pub speed_limits: Option<SpeedRestriction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restriction_bound_is_exclusive() {
        let restriction = SpeedRestriction::new(0.0, 25.0);
        assert!(!restriction.is_exceeded_by(25.0));
        assert!(restriction.is_exceeded_by(25.1));
        assert!(!restriction.is_exceeded_by(10.0));
    }
}
