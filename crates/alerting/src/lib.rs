//! Alerting System
//!
//! Provides minimum-interval gates and per-kind alert debouncing so that
//! safety alerts never re-fire within their cooldown.

mod gate;
mod manager;

pub use gate::{Clock, ManualClock, RateRestrictedGate, SystemClock};
pub use manager::{AlertConfig, AlertKind, AlertManager, AlertSound};
