//! HTTP client for the ElevenLabs text-to-speech API.

use std::time::Duration;

use reqwest::header::ACCEPT;

use super::Backend;
use super::types::{BackendError, SynthesizeRequest};

/// Public ElevenLabs API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Upper bound on a single synthesis request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "xi-api-key";

/// Blocking ElevenLabs client.
pub struct ElevenLabsBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ElevenLabsBackend {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synthesis endpoint for one voice.
    pub fn synthesis_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{voice_id}", self.base_url)
    }
}

impl Backend for ElevenLabsBackend {
    fn synthesize(
        &self,
        api_key: &str,
        voice_id: &str,
        request: &SynthesizeRequest,
    ) -> Result<Vec<u8>, BackendError> {
        let url = self.synthesis_url(voice_id);

        tracing::debug!(
            url = %url,
            model = %request.model_id,
            text_len = request.text.len(),
            "sending synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
