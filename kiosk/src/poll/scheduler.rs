use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Drives one fetch cycle at a fixed cadence on its own tokio task.
///
/// The cycle future is awaited inside the tick loop, so at most one
/// fetch is in flight per scheduler; ticks that fire while a fetch is
/// still outstanding are skipped, not queued. The fixed cadence is also
/// the retry mechanism: a failed cycle simply waits for the next tick.
#[derive(Debug)]
pub struct PollingScheduler {
    name: &'static str,
    cadence: Duration,
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    pub fn new(name: &'static str, cadence: Duration) -> Self {
        Self {
            name,
            cadence,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Starts ticking. A previously running task is stopped first.
    pub fn start<C, F>(&mut self, mut cycle: C)
    where
        C: FnMut() -> F + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        self.stop();
        debug!("starting {} poller every {:?}", self.name, self.cadence);
        let cadence = self.cadence;
        self.handle = Some(tokio::spawn(async move {
            let mut ticks = time::interval(cadence);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                cycle().await;
            }
        }));
    }

    /// Stops ticking and abandons any in-flight fetch. The session check
    /// in the state layer catches anything the abort races past.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("stopping {} poller", self.name);
            handle.abort();
        }
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
