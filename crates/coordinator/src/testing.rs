//! Recording collaborators for tests

use alerting::AlertSound;
use perception::{ModelPerformanceConfig, Route};
use std::sync::{Arc, Mutex};
use telemetry::{TelemetryReport, TelemetrySink};

use crate::command::PresentationCommand;
use crate::output::{AlertPlayer, Collaborators, EngineControl, Presenter};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Present(PresentationCommand),
    Play(AlertSound),
    StopAlerts,
    Performance(ModelPerformanceConfig),
    Route(Route),
    Telemetry(TelemetryReport),
}

/// Shared log of everything the collaborators received
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            presenter: Box::new(self.clone()),
            alerts: Box::new(self.clone()),
            engine: Box::new(self.clone()),
            telemetry: Box::new(self.clone()),
        }
    }

    pub fn entries(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, entry: Recorded) {
        self.0.lock().unwrap().push(entry);
    }
}

impl Presenter for Recorder {
    fn present(&self, command: PresentationCommand) {
        self.push(Recorded::Present(command));
    }
}

impl AlertPlayer for Recorder {
    fn play(&self, sound: AlertSound) {
        self.push(Recorded::Play(sound));
    }

    fn stop(&self) {
        self.push(Recorded::StopAlerts);
    }
}

impl EngineControl for Recorder {
    fn set_performance(&self, config: ModelPerformanceConfig) {
        self.push(Recorded::Performance(config));
    }

    fn set_route(&self, route: Route) {
        self.push(Recorded::Route(route));
    }
}

impl TelemetrySink for Recorder {
    fn send(&self, report: TelemetryReport) {
        self.push(Recorded::Telemetry(report));
    }
}
