//! Tracing subscriber setup

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::CoordinatorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// One JSON object per line
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level, CoordinatorError> {
        self.level
            .parse()
            .map_err(|_| CoordinatorError::InvalidLogLevel(self.level.clone()))
    }
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoordinatorError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.max_level()?)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| CoordinatorError::Logging(e.to_string()))
}
