//! Commands produced by the coordinator

use alerting::AlertSound;
use evaluation::SafetyState;
use perception::{
    ArCamera, ArLane, CalibrationProgress, FrameDetections, FrameSegmentation,
    ModelPerformanceConfig, RoadDescription, Route, Screen, SignIcon, VideoFrame,
};
use std::time::Duration;
use telemetry::TelemetryReport;

/// Side effect requested while handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Present(PresentationCommand),
    Alert(AlertCommand),
    Engine(EngineCommand),
    Telemetry(TelemetryReport),
    /// Handled by the runtime itself
    SignPoll(SignPollCommand),
}

/// Instructions for the UI collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCommand {
    /// Show the camera view layer
    Vision,
    DismissCurrent,
    Screen(Screen),
    BackButton { visible: bool },
    Frame(VideoFrame),
    Segmentation(FrameSegmentation),
    Detections(FrameDetections),
    Signs(Vec<SignIcon>),
    RoadDescription(Option<RoadDescription>),
    Calibration(Option<CalibrationProgress>),
    /// `None` hides the indicator
    SpeedLimit { icon: Option<SignIcon>, is_new: bool },
    Safety(SafetyState),
    ArCamera(ArCamera),
    ArLane(Option<ArLane>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCommand {
    Play(AlertSound),
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    SetPerformance(ModelPerformanceConfig),
    SetRoute(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPollCommand {
    /// Replace any running poll with one ticking every `period`
    Start(Duration),
    Stop,
}
