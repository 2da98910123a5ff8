use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{debug, info};
use shared::{Category, StatusSnapshot};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::api::SensorApiError;
use crate::events::{EventDeduplicator, Fingerprint, TallyStore};
use crate::poll::{ConnectionMonitor, ConnectionState};
use crate::tracking::{FrameSize, GazeOffset, GazeTracker};

/// Active input modality. Exactly one at a time; switching is a
/// side-effecting operation owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TrackingMode {
    #[strum(serialize = "pointer")]
    Pointer,
    #[strum(serialize = "remote-sensor")]
    RemoteSensor,
}

/// Notifications the sync core pushes to the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub enum KioskEvent {
    DetectionCounted { category: Category, count: u64 },
    ConnectionChanged(ConnectionState),
}

/// Render-ready snapshot of everything the UI shows.
#[derive(Debug, Clone)]
pub struct KioskView {
    pub mode: TrackingMode,
    pub connection: ConnectionState,
    pub gaze: GazeOffset,
    pub target_visible: bool,
    pub classifying: bool,
    pub in_cooldown: bool,
    pub tally: BTreeMap<Category, u64>,
    pub last_poll_at: Option<DateTime<Utc>>,
}

/// All mutable kiosk state, funneled through one owner.
///
/// Poll results carry the session token of the scheduler that issued
/// the fetch; results from a session that has been switched away from
/// are dropped, which is what makes counters and coordinates immune to
/// late responses racing a mode switch.
#[derive(Debug)]
pub struct KioskState {
    mode: TrackingMode,
    session: Option<Uuid>,
    connection: ConnectionMonitor,
    gaze: GazeTracker,
    dedup: EventDeduplicator,
    tally: TallyStore,
    classifying: bool,
    in_cooldown: bool,
    last_poll_at: Option<DateTime<Utc>>,
    events: Option<UnboundedSender<KioskEvent>>,
}

impl KioskState {
    pub fn new() -> Self {
        Self {
            mode: TrackingMode::Pointer,
            session: None,
            connection: ConnectionMonitor::new(),
            gaze: GazeTracker::new(),
            dedup: EventDeduplicator::new(),
            tally: TallyStore::new(),
            classifying: false,
            in_cooldown: false,
            last_poll_at: None,
            events: None,
        }
    }

    pub fn set_event_sink(&mut self, sender: UnboundedSender<KioskEvent>) {
        self.events = Some(sender);
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    /// Switches into sensor mode under a fresh session token. Called by
    /// the controller only after the remote start call succeeded.
    pub(crate) fn begin_sensor_session(&mut self) -> Uuid {
        let session = Uuid::new_v4();
        self.mode = TrackingMode::RemoteSensor;
        self.session = Some(session);
        self.dedup.reset();
        info!("sensor session {session} started");
        session
    }

    /// Returns to pointer mode, invalidating the session token so that
    /// any still-in-flight poll result is dropped on arrival.
    pub(crate) fn end_sensor_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!("sensor session {session} ended");
        }
        self.mode = TrackingMode::Pointer;
        self.dedup.reset();
        self.classifying = false;
        self.in_cooldown = false;
        self.gaze.clear_target();
        self.connection.reset();
    }

    /// Applies one gaze-cadence poll result.
    pub fn apply_gaze_poll(
        &mut self,
        session: Uuid,
        outcome: Result<StatusSnapshot, SensorApiError>,
        frame: FrameSize,
    ) {
        if !self.session_is_current(session) {
            debug!("dropping gaze poll from stale session {session}");
            return;
        }
        match outcome {
            Ok(snapshot) => {
                self.note_success();
                let coordinates = snapshot
                    .latest_detection
                    .as_ref()
                    .filter(|d| d.category != Category::Error)
                    .and_then(|d| d.coordinates());
                self.gaze.update_from_sensor(coordinates, frame);
            }
            Err(err) => {
                self.note_failure(&err);
                self.gaze.clear_target();
            }
        }
    }

    /// Applies one classification-cadence poll result. Counting happens
    /// here and nowhere else.
    pub fn apply_classification_poll(
        &mut self,
        session: Uuid,
        outcome: Result<StatusSnapshot, SensorApiError>,
    ) {
        if !self.session_is_current(session) {
            debug!("dropping classification poll from stale session {session}");
            return;
        }
        match outcome {
            Ok(snapshot) => {
                self.note_success();
                self.classifying = snapshot.classifying;
                self.in_cooldown = snapshot.in_cooldown;
                self.last_poll_at = Some(Utc::now());

                let fingerprint = snapshot.latest_detection.as_ref().and_then(Fingerprint::of);
                if let Some(fingerprint) = fingerprint {
                    if self.dedup.consider(Some(fingerprint)) {
                        let category = fingerprint.category();
                        let count = self.tally.increment(category);
                        info!("counted one {category} (total {count})");
                        self.emit(KioskEvent::DetectionCounted { category, count });
                    }
                }
            }
            Err(err) => self.note_failure(&err),
        }
    }

    /// Pointer input; ignored while the sensor drives the eyes.
    pub fn pointer_moved(&mut self, x: f64, y: f64, viewport: FrameSize) {
        if self.mode != TrackingMode::Pointer {
            return;
        }
        self.gaze.update_from_pointer(x, y, viewport);
    }

    pub fn reset_tally(&mut self) {
        self.tally.reset_all();
        info!("tally reset");
    }

    pub fn tally_count(&self, category: Category) -> u64 {
        self.tally.count(category)
    }

    pub fn view(&self) -> KioskView {
        KioskView {
            mode: self.mode,
            connection: self.connection.state(),
            gaze: self.gaze.offset(),
            target_visible: self.gaze.target_visible(),
            classifying: self.classifying,
            in_cooldown: self.in_cooldown,
            tally: self.tally.snapshot(),
            last_poll_at: self.last_poll_at,
        }
    }

    fn session_is_current(&self, session: Uuid) -> bool {
        self.session == Some(session)
    }

    fn note_success(&mut self) {
        let before = self.connection.state();
        self.connection.record_success();
        self.emit_if_connection_changed(before);
    }

    fn note_failure(&mut self, err: &SensorApiError) {
        let before = self.connection.state();
        self.connection.record_failure(err);
        self.emit_if_connection_changed(before);
    }

    fn emit_if_connection_changed(&mut self, before: ConnectionState) {
        let now = self.connection.state();
        if now != before {
            self.emit(KioskEvent::ConnectionChanged(now));
        }
    }

    fn emit(&self, event: KioskEvent) {
        if let Some(sender) = &self.events {
            // A dropped receiver only means nobody is listening.
            let _ = sender.send(event);
        }
    }
}

impl Default for KioskState {
    fn default() -> Self {
        Self::new()
    }
}
