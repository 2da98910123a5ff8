use log::{error, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use kiosk::api::{SensorClient, TtsClient};
use kiosk::config::KioskConfig;
use kiosk::mode::{KioskEvent, ModeController};

const THANK_YOU_LINES: [&str; 6] = [
    "Perfect, thanks!",
    "Right where it belongs!",
    "Nice aim! That really helps.",
    "Much appreciated!",
    "You got it! Thanks for recycling.",
    "Every item counts!",
];

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = KioskConfig::from_env();
    info!("detector service at {}", config.sensor_base_url);

    let http = reqwest::Client::new();
    let sensor = match SensorClient::new(http.clone(), &config.sensor_base_url) {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };
    let tts = match TtsClient::new(http, &config.tts_base_url) {
        Ok(client) => Some(client),
        Err(err) => {
            warn!("speech disabled: {err}");
            None
        }
    };

    let mut controller = ModeController::new(sensor, &config);
    let events = controller.subscribe();
    info!("video feed at {}", controller.video_feed_url());

    if let Err(err) = controller.enter_sensor_mode().await {
        error!("could not start sensor tracking, staying in pointer mode: {err}");
    }

    tokio::select! {
        _ = run_event_loop(events, tts) => {}
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    if let Err(err) = controller.exit_sensor_mode().await {
        warn!("detector may still be running: {err}");
    }
    for (category, count) in controller.view().tally {
        info!("final tally: {category} = {count}");
    }
}

async fn run_event_loop(mut events: UnboundedReceiver<KioskEvent>, tts: Option<TtsClient>) {
    let mut spoken = 0usize;
    while let Some(event) = events.recv().await {
        match event {
            KioskEvent::DetectionCounted { category, count } => {
                info!("sorted one {category} (total {count})");
                if let Some(tts) = &tts {
                    let line = THANK_YOU_LINES[spoken % THANK_YOU_LINES.len()];
                    spoken += 1;
                    match tts.synthesize(line).await {
                        Ok(audio) => {
                            // Playback belongs to the rendering layer;
                            // the headless binary just reports it.
                            info!("spoke \"{line}\" ({} bytes of audio)", audio.len());
                        }
                        Err(err) => warn!("speech synthesis failed: {err}"),
                    }
                }
            }
            KioskEvent::ConnectionChanged(state) => info!("detector connection: {state}"),
        }
    }
}
