//! Alert Manager Implementation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::gate::{Clock, RateRestrictedGate, SystemClock};

/// Alert channels, each debounced independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Vehicle started exceeding the posted limit
    SpeedLimitExceeded,
    /// Critical collision course with a pedestrian
    CriticalCollision,
}

impl AlertKind {
    pub const ALL: [AlertKind; 2] = [AlertKind::SpeedLimitExceeded, AlertKind::CriticalCollision];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::SpeedLimitExceeded => "speed_limit_exceeded",
            AlertKind::CriticalCollision => "critical_collision",
        }
    }

    /// Sound played for this alert
    pub fn sound(&self) -> AlertSound {
        match self {
            AlertKind::SpeedLimitExceeded => AlertSound::OverSpeedLimit,
            AlertKind::CriticalCollision => AlertSound::CollisionAlertCritical,
        }
    }
}

/// Sounds known to the alert player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertSound {
    OverSpeedLimit,
    CollisionAlertCritical,
}

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum interval between speed-limit alerts (milliseconds)
    pub speed_limit_cooldown_ms: u64,
    /// Minimum interval between collision alerts (milliseconds)
    pub collision_cooldown_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            speed_limit_cooldown_ms: 5000,
            collision_cooldown_ms: 3000,
        }
    }
}

impl AlertConfig {
    pub fn cooldown(&self, kind: AlertKind) -> Duration {
        match kind {
            AlertKind::SpeedLimitExceeded => Duration::from_millis(self.speed_limit_cooldown_ms),
            AlertKind::CriticalCollision => Duration::from_millis(self.collision_cooldown_ms),
        }
    }
}

/// Alert manager owning one gate per alert kind
pub struct AlertManager {
    /// Configuration
    config: AlertConfig,
    /// Gates by alert kind
    gates: HashMap<AlertKind, RateRestrictedGate>,
    /// Fired alerts by kind
    fire_counts: HashMap<AlertKind, usize>,
    clock: Arc<dyn Clock>,
}

impl AlertManager {
    /// Create an alert manager on the runtime clock
    pub fn new(config: AlertConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an alert manager on a supplied clock
    pub fn with_clock(config: AlertConfig, clock: Arc<dyn Clock>) -> Self {
        info!("Creating alert manager with config: {:?}", config);
        let gates = AlertKind::ALL
            .into_iter()
            .map(|kind| (kind, RateRestrictedGate::new(clock.clone())))
            .collect();

        Self {
            config,
            gates,
            fire_counts: HashMap::new(),
            clock,
        }
    }

    /// Fire `kind` unless it is inside its cooldown.
    ///
    /// Returns the sound to play; firing restarts the cooldown.
    pub fn try_fire(&mut self, kind: AlertKind) -> Option<AlertSound> {
        let cooldown = self.config.cooldown(kind);
        let clock = &self.clock;
        let gate = self
            .gates
            .entry(kind)
            .or_insert_with(|| RateRestrictedGate::new(clock.clone()));

        if !gate.is_allowed() {
            debug!("Alert suppressed: {} in cooldown", kind.as_str());
            metrics::counter!("overlay_alerts_suppressed_total", "kind" => kind.as_str())
                .increment(1);
            return None;
        }

        gate.restrict(cooldown);
        let count = self.fire_counts.entry(kind).or_insert(0);
        *count += 1;

        info!("Alert fired: {} (count: {})", kind.as_str(), count);
        metrics::counter!("overlay_alerts_fired_total", "kind" => kind.as_str()).increment(1);
        Some(kind.sound())
    }

    /// Whether `kind` could fire right now
    #[cfg(test)]
    fn is_allowed(&mut self, kind: AlertKind) -> bool {
        self.gates.get_mut(&kind).map_or(true, |gate| gate.is_allowed())
    }

    /// Number of times `kind` fired
    #[cfg(test)]
    fn fire_count(&self, kind: AlertKind) -> usize {
        self.fire_counts.get(&kind).copied().unwrap_or(0)
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
