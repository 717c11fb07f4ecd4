//! Speed limit evaluation

use perception::{Feed, Screen, ScreenModeController, SpeedRestriction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Presented speed-limit state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimitState {
    pub limit: SpeedRestriction,
    pub is_speeding: bool,
}

/// Values the evaluation reads from the coordinator's caches
#[derive(Debug, Clone, Copy)]
pub struct SpeedLimitInput {
    /// Vehicle speed (m/s), unknown until the first vehicle state
    pub speed_mps: Option<f32>,
    /// Last restriction reported by the safety engine
    pub restriction: Option<SpeedRestriction>,
    pub screen: Screen,
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedLimitUpdate {
    /// Nothing to show; any presented indicator must go
    Cleared,
    /// Same as the previous state, nothing to do
    Unchanged,
    /// A different state to present
    Changed {
        state: SpeedLimitState,
        /// No previous state, or the limit itself changed
        is_new: bool,
        /// Not speeding before, speeding now
        started_speeding: bool,
    },
}

/// Derives speeding state from speed and restriction
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedLimitEvaluator {
    screens: ScreenModeController,
}

impl SpeedLimitEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(
        &self,
        previous: Option<&SpeedLimitState>,
        input: SpeedLimitInput,
    ) -> SpeedLimitUpdate {
        if !self.screens.is_relevant(input.screen, Feed::SpeedLimit) {
            return SpeedLimitUpdate::Cleared;
        }
        let (Some(limit), Some(speed_mps)) = (input.restriction, input.speed_mps) else {
            return SpeedLimitUpdate::Cleared;
        };

        let state = SpeedLimitState {
            limit,
            is_speeding: limit.is_exceeded_by(speed_mps),
        };

        if previous == Some(&state) {
            return SpeedLimitUpdate::Unchanged;
        }

        debug!(
            "Speed {:.2} m/s against limit {:.2} m/s (speeding: {})",
            speed_mps, limit.max_mps, state.is_speeding
        );

        let was_speeding = previous.map_or(false, |p| p.is_speeding);
        SpeedLimitUpdate::Changed {
            state,
            is_new: previous.map_or(true, |p| p.limit != state.limit),
            started_speeding: state.is_speeding && !was_speeding,
        }
    }
}
