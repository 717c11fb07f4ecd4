//! AR engine outputs and routes

use serde::{Deserialize, Serialize};

/// AR camera pose
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArCamera {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    /// Mount height above the road (meters)
    pub height_m: f32,
    pub focal_length: f32,
}

/// AR lane geometry as a polyline in world space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArLane {
    pub points: Vec<[f32; 3]>,
}

/// Navigation route waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Route handed to the AR engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<RoutePoint>,
    /// Estimated travel time (seconds)
    #[serde(default)]
    pub eta_s: f64,
}
