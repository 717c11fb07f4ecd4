//! Coordinator task: one queue, one consumer

use perception::{Route, Screen};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::command::{Command, SignPollCommand};
use crate::coordinator::EventCoordinator;
use crate::event::InputEvent;
use crate::output::Collaborators;
use crate::CoordinatorError;

/// Sending side of the coordinator queue
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<InputEvent>,
}

impl CoordinatorHandle {
    /// Enqueue an engine event without waiting.
    ///
    /// Returns false when the event was dropped.
    pub fn publish(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!("Input queue full, dropping {} event", event.name());
                metrics::counter!("overlay_events_dropped_total").increment(1);
                false
            }
            Err(TrySendError::Closed(event)) => {
                warn!("Coordinator stopped, dropping {} event", event.name());
                false
            }
        }
    }

    /// Enqueue an event, waiting for queue space
    pub async fn send(&self, event: InputEvent) -> Result<(), CoordinatorError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| CoordinatorError::ChannelClosed)
    }

    pub async fn select_screen(&self, screen: Screen) -> Result<(), CoordinatorError> {
        self.send(InputEvent::SelectScreen(screen)).await
    }

    pub async fn back(&self) -> Result<(), CoordinatorError> {
        self.send(InputEvent::Back).await
    }

    pub async fn set_route(&self, route: Option<Route>) -> Result<(), CoordinatorError> {
        self.send(InputEvent::SetRoute(route)).await
    }
}

/// Owns the coordinator and drives it from the queue and the sign poll
pub struct CoordinatorTask {
    coordinator: EventCoordinator,
    collaborators: Collaborators,
    rx: mpsc::Receiver<InputEvent>,
    sign_poll: Option<Interval>,
}

impl CoordinatorTask {
    pub fn new(
        coordinator: EventCoordinator,
        collaborators: Collaborators,
    ) -> (Self, CoordinatorHandle) {
        let capacity = coordinator.config().queue_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);

        let task = Self {
            coordinator,
            collaborators,
            rx,
            sign_poll: None,
        };
        (task, CoordinatorHandle { tx })
    }

    pub fn spawn(self) -> JoinHandle<EventCoordinator> {
        tokio::spawn(self.run())
    }

    /// Process events until every handle is dropped, then hand back the
    /// coordinator.
    pub async fn run(mut self) -> EventCoordinator {
        let startup = self.coordinator.start();
        self.apply(startup);

        loop {
            tokio::select! {
                event = self.rx.recv() => match event {
                    Some(event) => {
                        if event.is_control() {
                            info!("UI request: {}", event.name());
                        } else {
                            debug!("Handling {} event", event.name());
                        }
                        let commands = self.coordinator.handle(event);
                        self.apply(commands);
                    }
                    None => break,
                },
                _ = next_tick(&mut self.sign_poll) => {
                    let commands = self.coordinator.handle(InputEvent::PollSigns);
                    self.apply(commands);
                }
            }
        }

        info!("Input queue closed, coordinator stopped");
        self.coordinator
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::SignPoll(SignPollCommand::Start(period)) => {
                    let period = period.max(Duration::from_millis(1));
                    let mut interval = time::interval_at(Instant::now() + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    self.sign_poll = Some(interval);
                }
                Command::SignPoll(SignPollCommand::Stop) => self.sign_poll = None,
                other => self.collaborators.dispatch(other),
            }
        }
    }
}

/// Next poll tick, or never when polling is off
async fn next_tick(poll: &mut Option<Interval>) {
    match poll {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PresentationCommand;
    use crate::coordinator::CoordinatorConfig;
    use crate::testing::{Recorded, Recorder};
    use alerting::AlertSound;
    use perception::{RoadRestrictions, Sign, SignKind, SpeedRestriction, VehicleState};

    fn spawn(config: CoordinatorConfig) -> (CoordinatorHandle, JoinHandle<EventCoordinator>, Recorder) {
        let recorder = Recorder::default();
        let (task, handle) =
            CoordinatorTask::new(EventCoordinator::new(config), recorder.collaborators());
        (handle, task.spawn(), recorder)
    }

    /// Poll presentations that showed at least one sign
    fn sign_polls(recorder: &Recorder) -> usize {
        recorder
            .entries()
            .iter()
            .filter(|e| matches!(e, Recorded::Present(PresentationCommand::Signs(icons)) if !icons.is_empty()))
            .count()
    }

    async fn track_speed_limit_sign(handle: &CoordinatorHandle) {
        handle
            .send(InputEvent::SignClassifications(vec![Sign::new(
                SignKind::SpeedLimit,
                25,
            )]))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_startup_and_shutdown() {
        let (handle, join, recorder) = spawn(CoordinatorConfig::default());
        drop(handle);

        let coordinator = join.await.unwrap();
        assert_eq!(coordinator.screen(), Screen::Menu);
        assert_eq!(
            recorder.entries()[0],
            Recorded::Present(PresentationCommand::Vision)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_poll_ticks_every_interval() {
        let (handle, join, recorder) = spawn(CoordinatorConfig::default());
        handle.select_screen(Screen::SignDetection).await.unwrap();
        track_speed_limit_sign(&handle).await;

        time::sleep(Duration::from_millis(900)).await;
        assert_eq!(sign_polls(&recorder), 0);

        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(sign_polls(&recorder), 1);

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(sign_polls(&recorder), 2);

        drop(handle);
        join.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_sign_detection_stops_poll() {
        let (handle, join, recorder) = spawn(CoordinatorConfig::default());
        handle.select_screen(Screen::SignDetection).await.unwrap();
        track_speed_limit_sign(&handle).await;

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(sign_polls(&recorder), 1);

        handle.select_screen(Screen::Map).await.unwrap();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sign_polls(&recorder), 1);

        drop(handle);
        let coordinator = join.await.unwrap();
        assert!(coordinator.tracked_signs().is_empty());
        assert!(!coordinator.is_sign_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselecting_replaces_poll() {
        let (handle, join, recorder) = spawn(CoordinatorConfig::default());
        handle.select_screen(Screen::SignDetection).await.unwrap();
        time::sleep(Duration::from_millis(500)).await;

        handle.select_screen(Screen::SignDetection).await.unwrap();
        track_speed_limit_sign(&handle).await;

        // First poll would have been due at 1000ms
        time::sleep(Duration::from_millis(700)).await;
        assert_eq!(sign_polls(&recorder), 0);

        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(sign_polls(&recorder), 1);

        drop(handle);
        join.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_speeding_alert_reaches_player() {
        let (handle, join, recorder) = spawn(CoordinatorConfig::default());
        handle.select_screen(Screen::DistanceToObject).await.unwrap();
        for event in [
            InputEvent::VehicleState(VehicleState {
                speed_mps: 30.0,
                ..Default::default()
            }),
            InputEvent::RoadRestrictions(RoadRestrictions {
                speed_limits: Some(SpeedRestriction::new(0.0, 25.0)),
            }),
            InputEvent::UpdateComplete,
            InputEvent::UpdateComplete,
        ] {
            assert!(handle.publish(event));
        }

        drop(handle);
        join.await.unwrap();

        let plays: Vec<Recorded> = recorder
            .entries()
            .into_iter()
            .filter(|e| matches!(e, Recorded::Play(_)))
            .collect();
        assert_eq!(plays, vec![Recorded::Play(AlertSound::OverSpeedLimit)]);
    }

    #[test]
    fn test_publish_drops_when_queue_full() {
        let config = CoordinatorConfig {
            queue_capacity: 1,
            ..Default::default()
        };
        let (_task, handle) =
            CoordinatorTask::new(EventCoordinator::new(config), Recorder::default().collaborators());

        assert!(handle.publish(InputEvent::UpdateComplete));
        assert!(!handle.publish(InputEvent::UpdateComplete));
    }

    #[tokio::test]
    async fn test_send_after_shutdown_fails() {
        let (task, handle) = CoordinatorTask::new(
            EventCoordinator::new(CoordinatorConfig::default()),
            Recorder::default().collaborators(),
        );
        drop(task);

        assert!(matches!(
            handle.back().await,
            Err(CoordinatorError::ChannelClosed)
        ));
        assert!(!handle.publish(InputEvent::Back));
    }
}
