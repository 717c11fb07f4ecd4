//! Rate-restricted gate

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Runtime clock. Follows tokio's clock so paused test runtimes drive it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward; clones share the same time
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// "Do not re-trigger within interval" primitive.
///
/// The pending reset is a single deadline, so calling `restrict` again
/// replaces it instead of stacking a second one.
pub struct RateRestrictedGate {
    allowed: bool,
    reset_at: Option<Instant>,
    clock: Arc<dyn Clock>,
}

impl RateRestrictedGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            allowed: true,
            reset_at: None,
            clock,
        }
    }

    /// Whether the guarded action may run now. Clears an elapsed restriction.
    pub fn is_allowed(&mut self) -> bool {
        if let Some(reset_at) = self.reset_at {
            if self.clock.now() >= reset_at {
                self.allowed = true;
                self.reset_at = None;
            }
        }
        self.allowed
    }

    /// Block until `interval` has elapsed from now
    pub fn restrict(&mut self, interval: Duration) {
        self.allowed = false;
        self.reset_at = Some(self.clock.now() + interval);
    }

    /// When the current restriction lifts, if any
    #[cfg(test)]
    fn reset_at(&self) -> Option<Instant> {
        self.reset_at
    }
}

impl fmt::Debug for RateRestrictedGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateRestrictedGate")
            .field("allowed", &self.allowed)
            .field("reset_at", &self.reset_at)
            .finish()
    }
}
