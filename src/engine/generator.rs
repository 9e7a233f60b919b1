//! Clip generation for a single voice pack.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::backend::{
    Backend, BackendError, DEFAULT_MODEL_ID, SynthesizeRequest, VoiceSettings,
};
use crate::catalog::clip_file_name;
use crate::clips::{ClipCatalog, ClipSourceError};
use crate::manifest::{Manifest, PackEntry};

/// Environment variable holding the ElevenLabs API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Errors that can occur while generating clips.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(
        "No voice id available for pack '{0}'. Pass --voice-id or set voice_id in the manifest."
    )]
    MissingVoice(String),

    #[error("ELEVENLABS_API_KEY is required to generate audio clips")]
    MissingCredential,

    #[error("Pack id not found in manifest: {0}")]
    UnknownPack(String),

    #[error("Clip source error: {0}")]
    ClipSource(#[from] ClipSourceError),

    #[error("Synthesis of {clip} failed: {source}")]
    Synthesis {
        clip: String,
        #[source]
        source: BackendError,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run settings for clip generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Voice id that takes precedence over the pack's stored one.
    pub voice_override: Option<String>,
    pub api_key: Option<String>,
    pub audio_root: PathBuf,
    pub clip_id_file: PathBuf,
    pub script_file: PathBuf,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    /// Regenerate clips whose file already exists.
    pub overwrite: bool,
    /// Pause between consecutive synthesis calls.
    pub request_delay: Duration,
}

impl GenerateOptions {
    /// Options with provider defaults and the given input/output locations.
    pub fn new(audio_root: PathBuf, clip_id_file: PathBuf, script_file: PathBuf) -> Self {
        Self {
            voice_override: None,
            api_key: None,
            audio_root,
            clip_id_file,
            script_file,
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_settings: VoiceSettings::default(),
            overwrite: false,
            request_delay: Duration::ZERO,
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Synthesizes the missing clips of a voice pack through a [`Backend`].
pub struct ClipGenerator<B: Backend> {
    backend: B,
}

impl<B: Backend> ClipGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Generate clips for the pack named `pack_id`.
    pub fn generate_for(
        &self,
        manifest: &Manifest,
        pack_id: &str,
        options: &GenerateOptions,
    ) -> Result<GenerateReport, GenerateError> {
        let pack = manifest
            .pack(pack_id)
            .ok_or_else(|| GenerateError::UnknownPack(pack_id.to_string()))?;
        self.generate(pack, options)
    }

    /// Generate every missing clip of `pack`.
    ///
    /// Existing files are skipped unless `options.overwrite` is set. The first
    /// failed request aborts the run; clips written before it stay on disk.
    pub fn generate(
        &self,
        pack: &PackEntry,
        options: &GenerateOptions,
    ) -> Result<GenerateReport, GenerateError> {
        let voice_id = options
            .voice_override
            .as_deref()
            .or(pack.voice_id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GenerateError::MissingVoice(pack.id.clone()))?;

        let api_key = options
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GenerateError::MissingCredential)?;

        let clips = ClipCatalog::load(&options.clip_id_file, &options.script_file)?;

        let output_dir = options.audio_root.join(pack.asset_dir());
        fs::create_dir_all(&output_dir).map_err(|source| GenerateError::Io {
            path: output_dir.clone(),
            source,
        })?;

        let total = clips.clip_ids.len();
        tracing::info!(
            pack = %pack.id,
            clips = total,
            dir = %output_dir.display(),
            "generating clips"
        );

        let mut report = GenerateReport {
            output_dir: output_dir.clone(),
            ..Default::default()
        };

        for (index, clip_id) in clips.clip_ids.iter().enumerate() {
            let position = index + 1;
            let target = output_dir.join(clip_file_name(clip_id));

            if target.exists() && !options.overwrite {
                tracing::info!("[{position}/{total}] skip {} (exists)", file_name(&target));
                report.skipped.push(clip_id.clone());
                continue;
            }

            if !report.generated.is_empty() && !options.request_delay.is_zero() {
                thread::sleep(options.request_delay);
            }

            tracing::info!("[{position}/{total}] tts {clip_id} -> {}", file_name(&target));
            let request = SynthesizeRequest::new(clips.line_for(clip_id))
                .with_model(options.model_id.clone())
                .with_settings(options.voice_settings);

            let audio = self
                .backend
                .synthesize(api_key, voice_id, &request)
                .map_err(|source| GenerateError::Synthesis {
                    clip: clip_id.clone(),
                    source,
                })?;

            fs::write(&target, &audio).map_err(|source| GenerateError::Io {
                path: target.clone(),
                source,
            })?;
            report.generated.push(clip_id.clone());
        }

        Ok(report)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
