//! Perception Event Types
//!
//! Values delivered by the perception, safety and AR engines and consumed
//! by the overlay coordinator:
//! - Screens and per-screen model performance
//! - Traffic signs and market-specific icons
//! - Collision objects and frame detections
//! - Road descriptions and speed restrictions
//! - Camera calibration, AR camera pose and lanes
//! - Vehicle state, GPS locations and speed units

pub mod ar;
pub mod frame;
pub mod object;
pub mod road;
pub mod screen;
pub mod sign;
pub mod vehicle;

pub use ar::{ArCamera, ArLane, Route, RoutePoint};
pub use frame::{FrameDetections, FrameSegmentation, VideoFrame};
pub use object::{CollisionObject, CollisionSeverity, DetectedObject, ObjectClass};
pub use road::{Lane, LaneDirection, RoadDescription, RoadRestrictions, SpeedRestriction};
pub use screen::{
    Feed, ModelPerformance, ModelPerformanceConfig, PerformanceMode, PerformanceRate, Screen,
    ScreenModeController,
};
pub use sign::{Country, Market, Sign, SignIcon, SignKind};
pub use vehicle::{CalibrationProgress, Camera, Location, SpeedUnit, VehicleState};

use thiserror::Error;

/// Perception error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerceptionError {
    #[error("Unknown screen: {0}")]
    UnknownScreen(String),
}
