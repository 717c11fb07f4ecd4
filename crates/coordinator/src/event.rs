//! Inputs consumed by the coordinator

use perception::{
    ArCamera, ArLane, Camera, CollisionObject, Country, FrameDetections, FrameSegmentation,
    Location, RoadDescription, RoadRestrictions, Route, Screen, Sign, VehicleState, VideoFrame,
};
use serde::{Deserialize, Serialize};

/// Every engine callback and UI request, funneled into one queue.
///
/// Serialized as `{"type": "...", "data": ...}` so captures can be replayed
/// from JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InputEvent {
    // Perception engine
    Frame(VideoFrame),
    Segmentation(FrameSegmentation),
    Detections(FrameDetections),
    SignClassifications(Vec<Sign>),
    VehicleState(VehicleState),
    RoadDescription(RoadDescription),
    Camera(Camera),
    Country(Country),
    /// End of one perception update cycle
    UpdateComplete,

    // Safety engine
    RoadRestrictions(RoadRestrictions),
    Collisions(Vec<CollisionObject>),

    // AR engine
    ArCamera(ArCamera),
    ArLane(Option<ArLane>),

    // Location provider
    Location(Location),

    // UI
    SelectScreen(Screen),
    Back,
    SetRoute(Option<Route>),

    /// Sign-detection poll tick
    PollSigns,
}

impl InputEvent {
    /// Requests issued by the UI rather than the engines
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            InputEvent::SelectScreen(_) | InputEvent::Back | InputEvent::SetRoute(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::Frame(_) => "frame",
            InputEvent::Segmentation(_) => "segmentation",
            InputEvent::Detections(_) => "detections",
            InputEvent::SignClassifications(_) => "sign_classifications",
            InputEvent::VehicleState(_) => "vehicle_state",
            InputEvent::RoadDescription(_) => "road_description",
            InputEvent::Camera(_) => "camera",
            InputEvent::Country(_) => "country",
            InputEvent::UpdateComplete => "update_complete",
            InputEvent::RoadRestrictions(_) => "road_restrictions",
            InputEvent::Collisions(_) => "collisions",
            InputEvent::ArCamera(_) => "ar_camera",
            InputEvent::ArLane(_) => "ar_lane",
            InputEvent::Location(_) => "location",
            InputEvent::SelectScreen(_) => "select_screen",
            InputEvent::Back => "back",
            InputEvent::SetRoute(_) => "set_route",
            InputEvent::PollSigns => "poll_signs",
        }
    }
}
