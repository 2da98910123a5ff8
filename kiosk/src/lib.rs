//! Client-side synchronization layer for the waste-sorting kiosk.
//!
//! Polls the remote vision service, folds its repeated snapshots into
//! exactly-once tally updates and gaze coordinates, and keeps the local
//! tracking mode consistent with the detector's start/stop lifecycle.
//! The rendering layer consumes [`mode::KioskView`] and never touches
//! the service directly.

pub mod api;
pub mod config;
pub mod events;
pub mod mode;
pub mod poll;
pub mod tracking;
