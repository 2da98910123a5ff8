use log::{debug, info, warn};

use crate::api::SensorApiError;

/// Reachability of the detector, as seen by the most recent poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Error,
}

/// Tracks detector health as a pure function of poll outcomes.
///
/// No retry or backoff lives here: the polling cadence is the retry
/// mechanism, so under sustained failure the state simply stays
/// `disconnected` until a poll succeeds again.
#[derive(Debug)]
pub struct ConnectionMonitor {
    state: ConnectionState,
}

impl ConnectionMonitor {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn record_success(&mut self) {
        self.transition(ConnectionState::Connected);
    }

    /// Network-level failures count as `disconnected`; a reachable but
    /// misbehaving service counts as `error`.
    pub fn record_failure(&mut self, err: &SensorApiError) {
        let next = if err.is_transport() {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Error
        };
        self.transition(next);
    }

    /// Returns to the initial state, used when a mode session ends.
    pub fn reset(&mut self) {
        debug!("connection monitor reset");
        self.state = ConnectionState::Disconnected;
    }

    fn transition(&mut self, next: ConnectionState) {
        if self.state == next {
            return;
        }
        match next {
            ConnectionState::Connected => info!("detector connection is up"),
            ConnectionState::Disconnected => warn!("detector unreachable, waiting for next poll"),
            ConnectionState::Error => warn!("detector reachable but failing, waiting for next poll"),
        }
        self.state = next;
    }
}

impl Default for ConnectionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
