use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{LifecycleResponse, StatusSnapshot};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SensorApiError {
    #[error("detector unreachable: {0}")]
    Transport(reqwest::Error),
    #[error("detector returned HTTP {0}")]
    Service(StatusCode),
    #[error("detector response not decodable: {0}")]
    Decode(reqwest::Error),
    #[error("invalid detector URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

impl SensorApiError {
    /// True for failures where the service never answered at all, as
    /// opposed to answering badly.
    pub fn is_transport(&self) -> bool {
        matches!(self, SensorApiError::Transport(_))
    }
}

/// HTTP client for the human-detection / classification service.
///
/// Endpoints are resolved once at construction so request paths can
/// never fail mid-poll.
#[derive(Debug, Clone)]
pub struct SensorClient {
    http: Client,
    status_url: Url,
    start_url: Url,
    stop_url: Url,
    video_feed_url: Url,
}

impl SensorClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, SensorApiError> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            http,
            status_url: base.join("status")?,
            start_url: base.join("start")?,
            stop_url: base.join("stop")?,
            video_feed_url: base.join("video_feed")?,
        })
    }

    /// Fetches the detector's current snapshot.
    pub async fn status(&self) -> Result<StatusSnapshot, SensorApiError> {
        let response = self
            .http
            .get(self.status_url.clone())
            .send()
            .await
            .map_err(SensorApiError::Transport)?;
        Self::decode(response).await
    }

    /// Asks the detector to start its camera loop. Idempotent on the
    /// service side.
    pub async fn start(&self) -> Result<LifecycleResponse, SensorApiError> {
        self.lifecycle(&self.start_url).await
    }

    /// Asks the detector to stop. Idempotent on the service side.
    pub async fn stop(&self) -> Result<LifecycleResponse, SensorApiError> {
        self.lifecycle(&self.stop_url).await
    }

    /// Live MJPEG stream address, consumed opaquely by the renderer.
    pub fn video_feed_url(&self) -> &Url {
        &self.video_feed_url
    }

    async fn lifecycle(&self, url: &Url) -> Result<LifecycleResponse, SensorApiError> {
        debug!("POST {url}");
        let response = self
            .http
            .post(url.clone())
            .send()
            .await
            .map_err(SensorApiError::Transport)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SensorApiError> {
        if !response.status().is_success() {
            return Err(SensorApiError::Service(response.status()));
        }
        response.json::<T>().await.map_err(SensorApiError::Decode)
    }
}
