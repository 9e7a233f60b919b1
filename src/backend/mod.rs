//! Text-to-speech provider communication.
//!
//! The [`Backend`] trait is the only seam between clip generation and the
//! network, which lets the engine be tested against a mock.

mod client;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ElevenLabsBackend};
pub use types::{
    BackendError, DEFAULT_MODEL_ID, DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY,
    SynthesizeRequest, VoiceSettings,
};

use std::time::Duration;

/// Trait for TTS provider communication.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Synthesize `request` with the given voice.
    ///
    /// # Returns
    /// Raw audio bytes as sent by the provider (MP3)
    fn synthesize(
        &self,
        api_key: &str,
        voice_id: &str,
        request: &SynthesizeRequest,
    ) -> Result<Vec<u8>, BackendError>;
}

/// Create an ElevenLabs backend.
pub fn create_backend(base_url: &str, timeout_secs: u64) -> Result<ElevenLabsBackend, BackendError> {
    ElevenLabsBackend::new(base_url, Duration::from_secs(timeout_secs))
}
