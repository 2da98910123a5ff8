mod connection;
mod scheduler;

pub use connection::{ConnectionMonitor, ConnectionState};
pub use scheduler::PollingScheduler;
