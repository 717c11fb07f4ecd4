//! Detection Tracker
//!
//! Keeps classified detections visible across perception ticks. The set is
//! bounded: once full, the least recently seen identity makes room for a new
//! one. There is no wall-clock expiry; callers poll at their own cadence.

mod tracker;

pub use tracker::{DetectionTracker, TrackedDetection, DEFAULT_CAPACITY};
