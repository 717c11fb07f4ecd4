//! Event coordinator state machine

use alerting::{AlertConfig, AlertKind, AlertManager, Clock, SystemClock};
use detection_tracker::{DetectionTracker, DEFAULT_CAPACITY};
use evaluation::{
    is_school_zone, SafetyAlertEvaluator, SafetyState, SpeedLimitEvaluator, SpeedLimitInput,
    SpeedLimitState, SpeedLimitUpdate,
};
use perception::{
    CalibrationProgress, Country, Feed, Location, Screen, ScreenModeController, Sign, SignIcon,
    SignKind, SpeedRestriction, SpeedUnit,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use telemetry::TelemetryReport;
use tracing::{debug, info, warn};

use crate::command::{AlertCommand, Command, EngineCommand, PresentationCommand, SignPollCommand};
use crate::event::InputEvent;

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Distinct signs kept on screen
    pub tracker_capacity: usize,
    /// Sign-detection poll period (milliseconds)
    pub sign_poll_interval_ms: u64,
    /// Input queue depth
    pub queue_capacity: usize,
    pub alerts: AlertConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            tracker_capacity: DEFAULT_CAPACITY,
            sign_poll_interval_ms: 1000,
            queue_capacity: 256,
            alerts: AlertConfig::default(),
        }
    }
}

impl CoordinatorConfig {
    pub fn sign_poll_interval(&self) -> Duration {
        Duration::from_millis(self.sign_poll_interval_ms)
    }
}

/// Single owner of all overlay state.
///
/// Every input goes through [`EventCoordinator::handle`], which returns the
/// commands to run in order. Presentation commands always precede alert
/// commands for the same event.
pub struct EventCoordinator {
    config: CoordinatorConfig,
    screens: ScreenModeController,
    speed_limits: SpeedLimitEvaluator,
    safety: SafetyAlertEvaluator,
    alerts: AlertManager,
    signs: DetectionTracker<Sign>,

    screen: Screen,
    sign_polling: bool,

    // Cached engine values
    speed_mps: Option<f32>,
    restriction: Option<SpeedRestriction>,
    calibration: Option<CalibrationProgress>,
    country: Country,
    location: Option<Location>,

    last_speed_limit: Option<SpeedLimitState>,
}

impl EventCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Coordinator whose alert cooldowns run on `clock`
    pub fn with_clock(config: CoordinatorConfig, clock: Arc<dyn Clock>) -> Self {
        let alerts = AlertManager::with_clock(config.alerts.clone(), clock);
        let signs = DetectionTracker::new(config.tracker_capacity);

        Self {
            config,
            screens: ScreenModeController::new(),
            speed_limits: SpeedLimitEvaluator::new(),
            safety: SafetyAlertEvaluator::new(),
            alerts,
            signs,
            screen: Screen::Menu,
            sign_polling: false,
            speed_mps: None,
            restriction: None,
            calibration: None,
            country: Country::Unknown,
            location: None,
            last_speed_limit: None,
        }
    }

    /// Startup sequence: show the camera view, then the menu
    pub fn start(&mut self) -> Vec<Command> {
        info!("Starting overlay coordinator");
        let mut commands = vec![Command::Present(PresentationCommand::Vision)];
        commands.extend(self.transition(Screen::Menu));
        commands
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::Frame(frame) => vec![present(PresentationCommand::Frame(frame))],

            InputEvent::Segmentation(segmentation) => self
                .present_if(Feed::Segmentation, || {
                    PresentationCommand::Segmentation(segmentation)
                }),

            InputEvent::Detections(detections) => {
                self.present_if(Feed::Detections, || PresentationCommand::Detections(detections))
            }

            InputEvent::SignClassifications(signs) => {
                if self.is_relevant(Feed::SignClassifications) {
                    self.signs.update(&signs);
                }
                Vec::new()
            }

            InputEvent::VehicleState(state) => {
                self.speed_mps = Some(state.speed_mps);
                Vec::new()
            }

            InputEvent::RoadDescription(road) => self.present_if(Feed::RoadDescription, || {
                PresentationCommand::RoadDescription(Some(road))
            }),

            InputEvent::Camera(camera) => {
                let calibration = camera.calibration();
                self.calibration = Some(calibration);
                self.present_if(Feed::Calibration, || {
                    PresentationCommand::Calibration(Some(calibration))
                })
            }

            InputEvent::Country(country) => {
                if country != self.country {
                    debug!("Country changed: {:?} -> {:?}", self.country, country);
                }
                self.country = country;
                Vec::new()
            }

            InputEvent::UpdateComplete => self.evaluate_speed_limit(),

            InputEvent::RoadRestrictions(restrictions) => {
                self.update_restriction(restrictions.speed_limits)
            }

            InputEvent::Collisions(collisions) => self.evaluate_collisions(collisions),

            InputEvent::ArCamera(camera) => {
                self.present_if(Feed::ArCamera, || PresentationCommand::ArCamera(camera))
            }

            InputEvent::ArLane(lane) => {
                self.present_if(Feed::ArLane, || PresentationCommand::ArLane(lane))
            }

            InputEvent::Location(location) => {
                self.location = Some(location);
                Vec::new()
            }

            InputEvent::SelectScreen(screen) => self.select(screen),

            InputEvent::Back => {
                let mut commands = self.reset_presentation();
                commands.extend(self.transition(Screen::Menu));
                commands
            }

            InputEvent::SetRoute(route) => route
                .map(|route| vec![Command::Engine(EngineCommand::SetRoute(route))])
                .unwrap_or_default(),

            InputEvent::PollSigns => {
                if self.sign_polling && self.screen == Screen::SignDetection {
                    self.poll_signs()
                } else {
                    debug!("Ignoring sign poll on {}", self.screen);
                    Vec::new()
                }
            }
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_sign_polling(&self) -> bool {
        self.sign_polling
    }

    /// Signs currently tracked, most recent first
    pub fn tracked_signs(&self) -> Vec<Sign> {
        self.signs.current()
    }

    pub fn last_speed_limit(&self) -> Option<&SpeedLimitState> {
        self.last_speed_limit.as_ref()
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    fn is_relevant(&self, feed: Feed) -> bool {
        self.screens.is_relevant(self.screen, feed)
    }

    fn present_if(
        &self,
        feed: Feed,
        command: impl FnOnce() -> PresentationCommand,
    ) -> Vec<Command> {
        if self.is_relevant(feed) {
            vec![present(command())]
        } else {
            Vec::new()
        }
    }

    fn select(&mut self, screen: Screen) -> Vec<Command> {
        let mut commands = self.leave(screen);

        match screen {
            Screen::SignDetection => commands.extend(self.start_sign_poll()),
            Screen::DistanceToObject => {
                commands.push(present(PresentationCommand::Calibration(self.calibration)))
            }
            _ => {}
        }

        commands.extend(self.transition(screen));
        commands
    }

    /// Cleanup owed by the active screen when switching to `next`
    fn leave(&mut self, next: Screen) -> Vec<Command> {
        if self.screen == next {
            return Vec::new();
        }

        match self.screen {
            Screen::SignDetection => {
                let mut commands = self.stop_sign_poll();
                commands.push(present(PresentationCommand::Signs(Vec::new())));
                commands
            }
            Screen::DistanceToObject => {
                self.last_speed_limit = None;
                vec![
                    present(hidden_speed_limit()),
                    present(PresentationCommand::Safety(SafetyState::None)),
                    present(PresentationCommand::Calibration(None)),
                ]
            }
            _ => Vec::new(),
        }
    }

    /// Dismiss, reconfigure the engine, show the screen, update the back
    /// button, then record the new screen.
    fn transition(&mut self, screen: Screen) -> Vec<Command> {
        info!("Screen transition: {} -> {}", self.screen, screen);

        let commands = vec![
            present(PresentationCommand::DismissCurrent),
            Command::Engine(EngineCommand::SetPerformance(
                self.screens.performance_config(screen),
            )),
            present(PresentationCommand::Screen(screen)),
            present(PresentationCommand::BackButton {
                visible: self.screens.back_button_visible(screen),
            }),
        ];

        self.screen = screen;
        commands
    }

    fn reset_presentation(&mut self) -> Vec<Command> {
        let mut commands = self.stop_sign_poll();
        self.last_speed_limit = None;

        commands.extend([
            Command::Alert(AlertCommand::Stop),
            present(PresentationCommand::Signs(Vec::new())),
            present(PresentationCommand::RoadDescription(None)),
            present(PresentationCommand::Safety(SafetyState::None)),
            present(PresentationCommand::Calibration(None)),
            present(hidden_speed_limit()),
        ]);
        commands
    }

    fn start_sign_poll(&mut self) -> Vec<Command> {
        let mut commands = self.stop_sign_poll();
        self.sign_polling = true;

        let period = self.config.sign_poll_interval();
        debug!("Sign poll every {:?}", period);
        commands.push(Command::SignPoll(SignPollCommand::Start(period)));
        commands
    }

    /// Stop polling and forget tracked signs
    fn stop_sign_poll(&mut self) -> Vec<Command> {
        self.signs.reset();
        if !self.sign_polling {
            return Vec::new();
        }

        self.sign_polling = false;
        vec![Command::SignPoll(SignPollCommand::Stop)]
    }

    fn poll_signs(&mut self) -> Vec<Command> {
        let market = self.country.market();
        let shown: Vec<(Sign, SignIcon)> = self
            .signs
            .current()
            .into_iter()
            .filter_map(|sign| sign.icon(false, market).map(|icon| (sign, icon)))
            .collect();

        let signs: Vec<Sign> = shown.iter().map(|(sign, _)| *sign).collect();
        let icons: Vec<SignIcon> = shown.into_iter().map(|(_, icon)| icon).collect();

        let mut commands = Vec::with_capacity(icons.len() + 1);
        if !icons.is_empty() {
            match self.location {
                Some(location) => {
                    let school_zone = is_school_zone(&signs);
                    commands.extend(icons.iter().map(|icon| {
                        Command::Telemetry(TelemetryReport::SignReport {
                            sign_name: icon.asset.clone(),
                            school_zone,
                            location,
                            speed_mps: self.speed_mps,
                        })
                    }));
                }
                None => warn!("No location, skipping {} sign reports", icons.len()),
            }
        }

        commands.insert(0, present(PresentationCommand::Signs(icons)));
        commands
    }

    fn update_restriction(&mut self, restriction: Option<SpeedRestriction>) -> Vec<Command> {
        self.restriction = restriction;

        match restriction {
            Some(limit) => vec![Command::Telemetry(TelemetryReport::SpeedSample {
                current_speed_mps: self.speed_mps,
                speed_limit_mps: limit.max_mps,
            })],
            None => {
                debug!("Speed restriction unknown");
                match self.last_speed_limit.take() {
                    Some(_) if self.screen == Screen::DistanceToObject => {
                        vec![present(hidden_speed_limit())]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    fn evaluate_speed_limit(&mut self) -> Vec<Command> {
        let input = SpeedLimitInput {
            speed_mps: self.speed_mps,
            restriction: self.restriction,
            screen: self.screen,
        };

        match self
            .speed_limits
            .evaluate(self.last_speed_limit.as_ref(), input)
        {
            SpeedLimitUpdate::Cleared => match self.last_speed_limit.take() {
                Some(_) => vec![present(hidden_speed_limit())],
                None => Vec::new(),
            },
            SpeedLimitUpdate::Unchanged => Vec::new(),
            SpeedLimitUpdate::Changed {
                state,
                is_new,
                started_speeding,
            } => {
                let mut commands = vec![present(PresentationCommand::SpeedLimit {
                    icon: self.speed_limit_icon(&state),
                    is_new,
                })];

                if started_speeding {
                    if let Some(sound) = self.alerts.try_fire(AlertKind::SpeedLimitExceeded) {
                        commands.push(Command::Alert(AlertCommand::Play(sound)));
                    }
                }

                match self.location {
                    Some(location) => {
                        commands.push(Command::Telemetry(TelemetryReport::SpeedReport {
                            vehicle_speed_mps: self.speed_mps.unwrap_or_default(),
                            speed_limit: state.limit,
                            location,
                        }))
                    }
                    None => warn!("No location, skipping speed report"),
                }

                self.last_speed_limit = Some(state);
                commands
            }
        }
    }

    fn evaluate_collisions(&mut self, collisions: Vec<perception::CollisionObject>) -> Vec<Command> {
        let assessment = self.safety.evaluate(self.screen, collisions);
        if !self.is_relevant(Feed::Collisions) {
            // Off-screen assessments are always clear and the banner was
            // hidden on leave
            debug_assert!(!assessment.alert && assessment.state == SafetyState::None);
            return Vec::new();
        }

        let mut commands = vec![present(PresentationCommand::Safety(assessment.state))];

        if assessment.alert {
            if let Some(sound) = self.alerts.try_fire(AlertKind::CriticalCollision) {
                commands.push(Command::Alert(AlertCommand::Play(sound)));
            }
        }
        commands
    }

    /// Speed-limit sign in the market's units, over-limit style while speeding
    fn speed_limit_icon(&self, state: &SpeedLimitState) -> Option<SignIcon> {
        let market = self.country.market();
        let number = SpeedUnit::for_market(market).whole_from_mps(state.limit.max_mps);
        Sign::new(SignKind::SpeedLimit, number).icon(state.is_speeding, market)
    }
}

fn present(command: PresentationCommand) -> Command {
    Command::Present(command)
}

fn hidden_speed_limit() -> PresentationCommand {
    PresentationCommand::SpeedLimit {
        icon: None,
        is_new: false,
    }
}
