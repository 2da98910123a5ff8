use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use url::Url;
use uuid::Uuid;

use crate::api::{SensorApiError, SensorClient};
use crate::config::KioskConfig;
use crate::poll::PollingScheduler;
use crate::tracking::FrameSize;

use super::state::{KioskEvent, KioskState, KioskView, TrackingMode};

#[derive(Debug, thiserror::Error)]
pub enum ModeSwitchError {
    #[error("detector start call failed: {0}")]
    Api(#[from] SensorApiError),
    #[error("detector refused to start: {0}")]
    Rejected(String),
    #[error("detector stop call failed (already back in pointer mode): {0}")]
    StopFailed(SensorApiError),
}

/// Top-level orchestrator: owns the mode state machine, the two polling
/// cadences, and the only code path allowed to call the detector's
/// start/stop lifecycle.
pub struct ModeController {
    sensor: SensorClient,
    state: Arc<Mutex<KioskState>>,
    gaze_poller: PollingScheduler,
    classification_poller: PollingScheduler,
    camera_frame: FrameSize,
}

impl ModeController {
    pub fn new(sensor: SensorClient, config: &KioskConfig) -> Self {
        Self {
            sensor,
            state: Arc::new(Mutex::new(KioskState::new())),
            gaze_poller: PollingScheduler::new("gaze", config.gaze_poll_interval),
            classification_poller: PollingScheduler::new(
                "classification",
                config.classification_poll_interval,
            ),
            camera_frame: config.camera_frame,
        }
    }

    /// Hands out the event stream. Replaces any previous subscriber.
    pub fn subscribe(&self) -> UnboundedReceiver<KioskEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.state().set_event_sink(sender);
        receiver
    }

    pub fn mode(&self) -> TrackingMode {
        self.state().mode()
    }

    pub fn view(&self) -> KioskView {
        self.state().view()
    }

    /// Pointer input from the rendering layer; a no-op in sensor mode.
    pub fn pointer_moved(&self, x: f64, y: f64, viewport: FrameSize) {
        self.state().pointer_moved(x, y, viewport);
    }

    /// Zeroes every counter, independent of any in-flight poll.
    pub fn reset_tally(&self) {
        self.state().reset_tally();
    }

    pub fn video_feed_url(&self) -> &Url {
        self.sensor.video_feed_url()
    }

    /// Switches to sensor-driven tracking. Atomic: on any failure the
    /// controller is left exactly as it was, still in pointer mode.
    pub async fn enter_sensor_mode(&mut self) -> Result<(), ModeSwitchError> {
        if self.mode() == TrackingMode::RemoteSensor {
            return Ok(());
        }

        let response = self.sensor.start().await?;
        if !response.is_success() {
            return Err(ModeSwitchError::Rejected(
                response.message.unwrap_or_else(|| "no reason given".into()),
            ));
        }

        let session = self.state().begin_sensor_session();
        self.spawn_pollers(session);
        info!("tracking mode is now remote-sensor");
        Ok(())
    }

    /// Switches back to pointer-driven tracking. The local transition
    /// always happens; a failed remote stop is returned after the fact
    /// so the UI can surface it, with the controller already in pointer
    /// mode.
    pub async fn exit_sensor_mode(&mut self) -> Result<(), ModeSwitchError> {
        if self.mode() == TrackingMode::Pointer {
            return Ok(());
        }

        self.gaze_poller.stop();
        self.classification_poller.stop();
        let stop_result = self.sensor.stop().await;
        self.state().end_sensor_session();
        info!("tracking mode is now pointer");

        match stop_result {
            Ok(response) => {
                if !response.is_success() {
                    warn!("detector stop rejected: {:?}", response.message);
                }
                Ok(())
            }
            Err(err) => {
                error!("detector stop call failed: {err}");
                Err(ModeSwitchError::StopFailed(err))
            }
        }
    }

    fn spawn_pollers(&mut self, session: Uuid) {
        let client = self.sensor.clone();
        let state = Arc::clone(&self.state);
        let frame = self.camera_frame;
        self.gaze_poller.start(move || {
            let client = client.clone();
            let state = Arc::clone(&state);
            async move {
                let outcome = client.status().await;
                lock(&state).apply_gaze_poll(session, outcome, frame);
            }
        });

        let client = self.sensor.clone();
        let state = Arc::clone(&self.state);
        self.classification_poller.start(move || {
            let client = client.clone();
            let state = Arc::clone(&state);
            async move {
                let outcome = client.status().await;
                lock(&state).apply_classification_poll(session, outcome);
            }
        });
    }

    fn state(&self) -> MutexGuard<'_, KioskState> {
        lock(&self.state)
    }
}

fn lock(state: &Arc<Mutex<KioskState>>) -> MutexGuard<'_, KioskState> {
    state.lock().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    fn unreachable_controller() -> ModeController {
        // Port 9 (discard) is closed on any sane host, so lifecycle
        // calls fail at the transport level.
        let sensor = SensorClient::new(reqwest::Client::new(), "http://127.0.0.1:9/").unwrap();
        ModeController::new(sensor, &KioskConfig::from_env())
    }

    #[tokio::test]
    async fn failed_start_leaves_pointer_mode_untouched() {
        let mut controller = unreachable_controller();
        let err = controller.enter_sensor_mode().await.unwrap_err();
        assert!(matches!(err, ModeSwitchError::Api(_)));

        let view = controller.view();
        assert_eq!(view.mode, TrackingMode::Pointer);
        assert!(view.tally.values().all(|&count| count == 0));
        assert!(!controller.gaze_poller.is_running());
        assert!(!controller.classification_poller.is_running());
    }

    #[tokio::test]
    async fn exit_without_enter_is_a_no_op() {
        let mut controller = unreachable_controller();
        assert!(controller.exit_sensor_mode().await.is_ok());
        assert_eq!(controller.mode(), TrackingMode::Pointer);
    }

    #[tokio::test]
    async fn pointer_events_drive_the_view_in_pointer_mode() {
        let controller = unreachable_controller();
        controller.pointer_moved(1920.0, 1080.0, FrameSize::new(1920.0, 1080.0));
        let view = controller.view();
        assert_eq!(view.gaze.x, 20.0);
        assert_eq!(view.gaze.y, 10.0);
        assert_eq!(view.tally.get(&Category::Can), Some(&0));
    }
}
