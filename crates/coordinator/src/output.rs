//! Collaborators receiving coordinator commands

use alerting::AlertSound;
use perception::{ModelPerformanceConfig, Route};
use telemetry::TelemetrySink;
use tracing::{debug, info};

use crate::command::{AlertCommand, Command, EngineCommand, PresentationCommand};

/// UI layer
pub trait Presenter: Send {
    fn present(&self, command: PresentationCommand);
}

/// Audio alerts
pub trait AlertPlayer: Send {
    fn play(&self, sound: AlertSound);
    fn stop(&self);
}

/// Perception and AR engine control
pub trait EngineControl: Send {
    fn set_performance(&self, config: ModelPerformanceConfig);
    fn set_route(&self, route: Route);
}

/// Handles the coordinator task dispatches to
pub struct Collaborators {
    pub presenter: Box<dyn Presenter>,
    pub alerts: Box<dyn AlertPlayer>,
    pub engine: Box<dyn EngineControl>,
    pub telemetry: Box<dyn TelemetrySink>,
}

impl Collaborators {
    /// Log-only collaborators around a telemetry sink
    pub fn logging(telemetry: Box<dyn TelemetrySink>) -> Self {
        Self {
            presenter: Box::new(LoggingPresenter),
            alerts: Box::new(LoggingAlertPlayer),
            engine: Box::new(LoggingEngine),
            telemetry,
        }
    }

    /// Route one command. Sign poll commands belong to the runtime and are
    /// ignored here.
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::Present(presentation) => self.presenter.present(presentation),
            Command::Alert(AlertCommand::Play(sound)) => self.alerts.play(sound),
            Command::Alert(AlertCommand::Stop) => self.alerts.stop(),
            Command::Engine(EngineCommand::SetPerformance(config)) => {
                self.engine.set_performance(config)
            }
            Command::Engine(EngineCommand::SetRoute(route)) => self.engine.set_route(route),
            Command::Telemetry(report) => self.telemetry.send(report),
            Command::SignPoll(poll) => debug!("Sign poll command not routed: {:?}", poll),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPresenter;

impl Presenter for LoggingPresenter {
    fn present(&self, command: PresentationCommand) {
        match command {
            // Per-frame streams stay at debug
            PresentationCommand::Frame(frame) => debug!("Frame #{}", frame.sequence),
            PresentationCommand::Segmentation(seg) => debug!("Segmentation #{}", seg.sequence),
            PresentationCommand::Detections(det) => {
                debug!("Detections #{}: {} objects", det.sequence, det.objects.len())
            }
            ar @ (PresentationCommand::ArCamera(_) | PresentationCommand::ArLane(_)) => {
                debug!("AR update: {:?}", ar)
            }
            PresentationCommand::Screen(screen) => info!("Showing screen: {}", screen),
            PresentationCommand::Signs(icons) => {
                let assets: Vec<&str> = icons.iter().map(|i| i.asset.as_str()).collect();
                info!("Signs: {:?}", assets)
            }
            other => info!("Present: {:?}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAlertPlayer;

impl AlertPlayer for LoggingAlertPlayer {
    fn play(&self, sound: AlertSound) {
        info!("Playing alert: {:?}", sound);
    }

    fn stop(&self) {
        debug!("Stopping alerts");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEngine;

impl EngineControl for LoggingEngine {
    fn set_performance(&self, config: ModelPerformanceConfig) {
        info!("Model performance: {:?}", config);
    }

    fn set_route(&self, route: Route) {
        info!("Route set: {} points, eta {:.0}s", route.points.len(), route.eta_s);
    }
}
