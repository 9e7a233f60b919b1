//! Backend request types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ElevenLabs model used for narration clips.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Default voice stability, in `[0, 1]`.
pub const DEFAULT_STABILITY: f32 = 0.45;

/// Default similarity boost, in `[0, 1]`.
pub const DEFAULT_SIMILARITY_BOOST: f32 = 0.85;

/// Errors that can occur when communicating with the TTS provider.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("ElevenLabs request timed out")]
    Timeout,

    #[error("ElevenLabs request failed ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client setup failed: {0}")]
    Client(String),
}

/// Voice tuning sent with every request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
        }
    }
}

/// JSON body of a text-to-speech request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesizeRequest {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

impl SynthesizeRequest {
    /// Create a request with the default model and voice settings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_settings: VoiceSettings::default(),
        }
    }

    /// Set the model id.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the voice settings.
    pub fn with_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = settings;
        self
    }
}
