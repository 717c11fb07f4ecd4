//! Per-frame engine outputs

use serde::{Deserialize, Serialize};

use crate::object::DetectedObject;

/// Camera frame forwarded to the UI untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFrame {
    /// Encoded pixel data, opaque to the coordinator
    #[serde(default)]
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

/// Per-pixel class map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSegmentation {
    pub width: u32,
    pub height: u32,
    /// Class id per pixel, row-major
    #[serde(default)]
    pub classes: Vec<u8>,
    pub sequence: u32,
}

/// Object detections for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    pub objects: Vec<DetectedObject>,
    pub sequence: u32,
}
