//! Overlay Coordinator
//!
//! Routes perception, safety and AR engine events to the overlay UI
//! depending on the active screen, debounces audible alerts and emits
//! driving telemetry. All state lives in one task fed by a bounded queue.

pub mod command;
pub mod config;
pub mod coordinator;
pub mod event;
pub mod logging;
pub mod output;
pub mod runtime;

#[cfg(test)]
mod testing;

pub use command::{AlertCommand, Command, EngineCommand, PresentationCommand, SignPollCommand};
pub use config::AppConfig;
pub use coordinator::{CoordinatorConfig, EventCoordinator};
pub use event::InputEvent;
pub use logging::{init_logging, LoggingConfig};
pub use output::{
    AlertPlayer, Collaborators, EngineControl, LoggingAlertPlayer, LoggingEngine,
    LoggingPresenter, Presenter,
};
pub use runtime::{CoordinatorHandle, CoordinatorTask};

use thiserror::Error;

/// Coordinator error types
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Coordinator channel closed")]
    ChannelClosed,

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] telemetry::TelemetryError),
}
