//! Screens and model performance configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PerceptionError;

/// Active presentation mode of the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Menu,
    SignDetection,
    Segmentation,
    ObjectDetection,
    DistanceToObject,
    Map,
    LaneDetection,
    ArRouting,
}

impl Screen {
    /// All screens, menu first
    pub const ALL: [Screen; 8] = [
        Screen::Menu,
        Screen::SignDetection,
        Screen::Segmentation,
        Screen::ObjectDetection,
        Screen::DistanceToObject,
        Screen::Map,
        Screen::LaneDetection,
        Screen::ArRouting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::SignDetection => "sign-detection",
            Screen::Segmentation => "segmentation",
            Screen::ObjectDetection => "object-detection",
            Screen::DistanceToObject => "distance-to-object",
            Screen::Map => "map",
            Screen::LaneDetection => "lane-detection",
            Screen::ArRouting => "ar-routing",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = PerceptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| PerceptionError::UnknownScreen(s.to_string()))
    }
}

/// How the engine schedules a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceMode {
    /// Run at the configured rate regardless of load
    Fixed,
    /// Let the engine adapt the rate to device load
    Dynamic,
}

/// Model inference rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceRate {
    Low,
    Medium,
    High,
}

/// Performance of a single model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub mode: PerformanceMode,
    pub rate: PerformanceRate,
}

impl ModelPerformance {
    /// Fixed-mode performance at the given rate
    pub const fn fixed(rate: PerformanceRate) -> Self {
        Self {
            mode: PerformanceMode::Fixed,
            rate,
        }
    }
}

/// Engine configuration for the segmentation and detection models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelPerformanceConfig {
    /// Both models share one merged network
    Merged { performance: ModelPerformance },

    /// Models run separately at independent rates
    Separate {
        segmentation: ModelPerformance,
        detection: ModelPerformance,
    },
}

/// Engine output streams whose relevance depends on the active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Segmentation,
    Detections,
    SignClassifications,
    RoadDescription,
    Calibration,
    SpeedLimit,
    Collisions,
    ArCamera,
    ArLane,
}

/// Maps screens to engine configuration and gates feeds by screen
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenModeController;

impl ScreenModeController {
    pub fn new() -> Self {
        Self
    }

    /// Engine configuration to apply before `screen` becomes active
    pub fn performance_config(&self, screen: Screen) -> ModelPerformanceConfig {
        use PerformanceRate::*;

        match screen {
            Screen::SignDetection | Screen::ObjectDetection => ModelPerformanceConfig::Merged {
                performance: ModelPerformance::fixed(High),
            },
            Screen::Segmentation => ModelPerformanceConfig::Separate {
                segmentation: ModelPerformance::fixed(High),
                detection: ModelPerformance::fixed(Low),
            },
            Screen::DistanceToObject | Screen::LaneDetection => ModelPerformanceConfig::Merged {
                performance: ModelPerformance::fixed(Medium),
            },
            Screen::Map | Screen::Menu | Screen::ArRouting => ModelPerformanceConfig::Merged {
                performance: ModelPerformance::fixed(Low),
            },
        }
    }

    /// The back affordance is hidden only on the menu
    pub fn back_button_visible(&self, screen: Screen) -> bool {
        screen != Screen::Menu
    }

    /// Screen that renders a feed
    pub fn screen_for(&self, feed: Feed) -> Screen {
        match feed {
            Feed::Segmentation => Screen::Segmentation,
            Feed::Detections => Screen::ObjectDetection,
            Feed::SignClassifications => Screen::SignDetection,
            Feed::RoadDescription => Screen::LaneDetection,
            Feed::Calibration | Feed::SpeedLimit | Feed::Collisions => Screen::DistanceToObject,
            Feed::ArCamera | Feed::ArLane => Screen::ArRouting,
        }
    }

    /// Whether a feed may be presented while `active` is on screen
    pub fn is_relevant(&self, active: Screen, feed: Feed) -> bool {
        self.screen_for(feed) == active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_table() {
        let controller = ScreenModeController::new();

        let high = ModelPerformanceConfig::Merged {
            performance: ModelPerformance::fixed(PerformanceRate::High),
        };
        let medium = ModelPerformanceConfig::Merged {
            performance: ModelPerformance::fixed(PerformanceRate::Medium),
        };
        let low = ModelPerformanceConfig::Merged {
            performance: ModelPerformance::fixed(PerformanceRate::Low),
        };

        assert_eq!(controller.performance_config(Screen::SignDetection), high);
        assert_eq!(controller.performance_config(Screen::ObjectDetection), high);
        assert_eq!(controller.performance_config(Screen::DistanceToObject), medium);
        assert_eq!(controller.performance_config(Screen::LaneDetection), medium);
        assert_eq!(controller.performance_config(Screen::Map), low);
        assert_eq!(controller.performance_config(Screen::Menu), low);
        assert_eq!(controller.performance_config(Screen::ArRouting), low);
    }

    #[test]
    fn test_segmentation_runs_models_separately() {
        let config = ScreenModeController::new().performance_config(Screen::Segmentation);
        assert_eq!(
            config,
            ModelPerformanceConfig::Separate {
                segmentation: ModelPerformance::fixed(PerformanceRate::High),
                detection: ModelPerformance::fixed(PerformanceRate::Low),
            }
        );
    }

    #[test]
    fn test_back_button_hidden_on_menu_only() {
        let controller = ScreenModeController::new();
        for screen in Screen::ALL {
            assert_eq!(controller.back_button_visible(screen), screen != Screen::Menu);
        }
    }

    #[test]
    fn test_feed_relevance() {
        let controller = ScreenModeController::new();
        assert!(controller.is_relevant(Screen::DistanceToObject, Feed::Collisions));
        assert!(!controller.is_relevant(Screen::Menu, Feed::Collisions));
        assert!(controller.is_relevant(Screen::ArRouting, Feed::ArLane));
        assert!(!controller.is_relevant(Screen::SignDetection, Feed::Detections));
    }

    #[test]
    fn test_screen_parse_roundtrip() {
        for screen in Screen::ALL {
            assert_eq!(screen.as_str().parse::<Screen>(), Ok(screen));
        }
        assert_eq!(
            "radar".parse::<Screen>(),
            Err(PerceptionError::UnknownScreen("radar".to_string()))
        );
    }

    #[test]
    fn test_screen_serde_matches_display() {
        let json = serde_json::to_string(&Screen::DistanceToObject).unwrap();
        assert_eq!(json, "\"distance-to-object\"");
    }
}
