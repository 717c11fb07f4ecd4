//! Detected objects and collision objects

use serde::{Deserialize, Serialize};

/// Object class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Person,
    Car,
    Bicycle,
    Motorcycle,
    Truck,
    TrafficLight,
    TrafficSign,
    Unknown,
}

/// Detected object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Object class
    pub class: ObjectClass,

    /// Bounding box [x, y, width, height]
    pub bbox: [f32; 4],

    /// Detection confidence
    pub confidence: f32,
}

/// Collision risk tier reported by the safety engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionSeverity {
    Normal,
    Warning,
    Critical,
}

/// Object on a collision course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionObject {
    pub object_type: ObjectClass,
    pub state: CollisionSeverity,

    /// Estimated distance (meters)
    #[serde(default)]
    pub distance_m: Option<f32>,
}

impl CollisionObject {
    pub fn new(object_type: ObjectClass, state: CollisionSeverity) -> Self {
        Self {
            object_type,
            state,
            distance_m: None,
        }
    }

    /// Critical collision with a pedestrian
    pub fn is_critical_person(&self) -> bool {
        self.object_type == ObjectClass::Person && self.state == CollisionSeverity::Critical
    }
}
