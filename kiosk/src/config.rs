use std::env;
use std::time::Duration;

use log::warn;

use crate::tracking::FrameSize;

/// Runtime knobs, all env-driven with kiosk-friendly defaults. The poll
/// cadences are configuration, not design invariants: 100 ms keeps eye
/// motion fluid, 2000 ms is plenty for a classifier with a multi-second
/// cooldown.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    pub sensor_base_url: String,
    pub tts_base_url: String,
    pub gaze_poll_interval: Duration,
    pub classification_poll_interval: Duration,
    pub camera_frame: FrameSize,
}

impl KioskConfig {
    pub fn from_env() -> Self {
        Self {
            sensor_base_url: env::var("SENSOR_API_URL")
                .unwrap_or_else(|_| "http://localhost:5001".into()),
            tts_base_url: env::var("TTS_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".into()),
            gaze_poll_interval: Duration::from_millis(env_u64("GAZE_POLL_MS", 100)),
            classification_poll_interval: Duration::from_millis(env_u64(
                "CLASSIFICATION_POLL_MS",
                2000,
            )),
            camera_frame: FrameSize::new(
                env_f64("CAMERA_FRAME_WIDTH", 640.0),
                env_f64("CAMERA_FRAME_HEIGHT", 480.0),
            ),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring unparseable {key}={raw}");
            default
        }),
        Err(_) => default,
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring unparseable {key}={raw}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        assert_eq!(env_u64("KIOSK_TEST_UNSET_U64", 2000), 2000);
        assert_eq!(env_f64("KIOSK_TEST_UNSET_F64", 640.0), 640.0);
    }

    #[test]
    fn set_keys_override_defaults() {
        unsafe {
            env::set_var("KIOSK_TEST_SET_U64", "250");
            env::set_var("KIOSK_TEST_BAD_U64", "fast");
        }
        assert_eq!(env_u64("KIOSK_TEST_SET_U64", 100), 250);
        assert_eq!(env_u64("KIOSK_TEST_BAD_U64", 100), 100);
    }
}
