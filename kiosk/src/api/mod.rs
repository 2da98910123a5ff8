mod sensor;
mod tts;

pub use sensor::{SensorApiError, SensorClient};
pub use tts::{TtsClient, TtsError};
