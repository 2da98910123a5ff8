mod controller;
mod state;

pub use controller::{ModeController, ModeSwitchError};
pub use state::{KioskEvent, KioskState, KioskView, TrackingMode};
