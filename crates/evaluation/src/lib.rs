//! Evaluation
//!
//! Stateless evaluators turning cached perception values into presentable
//! state and alert requests:
//! - Speed limit and speeding transitions
//! - Collision safety state and critical pedestrian alerts
//! - School-zone status from tracked signs
//!
//! The caller owns the previous state and the alert gates.

pub mod safety;
pub mod school_zone;
pub mod speed_limit;

pub use safety::{SafetyAlertEvaluator, SafetyAssessment, SafetyState};
pub use school_zone::is_school_zone;
pub use speed_limit::{SpeedLimitEvaluator, SpeedLimitInput, SpeedLimitState, SpeedLimitUpdate};
