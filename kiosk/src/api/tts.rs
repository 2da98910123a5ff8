use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use shared::{TtsRequest, TtsResponse};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("speech service unreachable: {0}")]
    Transport(reqwest::Error),
    #[error("speech service returned HTTP {0}")]
    Service(StatusCode),
    #[error("speech response not decodable: {0}")]
    Decode(reqwest::Error),
    #[error("audio payload is not valid base64: {0}")]
    Audio(#[from] base64::DecodeError),
    #[error("invalid speech service URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Thin client for the text-to-speech service. The sync core never
/// depends on it; only the embedding application speaks.
#[derive(Debug, Clone)]
pub struct TtsClient {
    http: Client,
    endpoint: Url,
}

impl TtsClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, TtsError> {
        let endpoint = Url::parse(base_url)?.join("tts")?;
        Ok(Self { http, endpoint })
    }

    /// Synthesizes `text` and returns the decoded mp3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let request = TtsRequest {
            text: text.to_string(),
        };
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(TtsError::Transport)?;
        if !response.status().is_success() {
            return Err(TtsError::Service(response.status()));
        }
        let body: TtsResponse = response.json().await.map_err(TtsError::Decode)?;
        Ok(STANDARD.decode(body.audio.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_resolved_at_construction() {
        let client = TtsClient::new(Client::new(), "http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.endpoint.as_str(), "http://127.0.0.1:5000/tts");
    }
}
