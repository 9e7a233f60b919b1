//! CLI argument definitions and parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::backend::{
    DEFAULT_BASE_URL, DEFAULT_MODEL_ID, DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY,
    DEFAULT_TIMEOUT_SECS, VoiceSettings,
};
use crate::catalog::DEFAULT_PACKAGE;
use crate::engine::API_KEY_ENV;
use crate::manifest::PackUpdate;
use crate::pipeline::{PipelineConfig, RunMode};

/// Generate or update narration voice packs and refresh VoicePackCatalog.kt.
#[derive(Parser, Debug)]
#[command(name = "voice-pack-gen")]
#[command(about = "Generate/update voice packs and refresh VoicePackCatalog.kt")]
#[command(version)]
pub struct Args {
    /// Stable voice pack id, e.g. wizard or rainbird_en
    #[arg(long)]
    pub pack_id: Option<String>,

    /// Human-readable pack name
    #[arg(long)]
    pub display_name: Option<String>,

    /// Pack description shown in the selection UI
    #[arg(long)]
    pub description: Option<String>,

    /// ElevenLabs voice id used for clip generation
    #[arg(long)]
    pub voice_id: Option<String>,

    /// Audio folder under the audio root (defaults to pack id)
    #[arg(long)]
    pub asset_dir: Option<String>,

    /// Kotlin constant name for this pack id
    #[arg(long)]
    pub const_name: Option<String>,

    /// Set this pack as default in the catalog
    #[arg(long)]
    pub set_default: bool,

    /// Only regenerate VoicePackCatalog.kt from the manifest
    #[arg(long)]
    pub sync_only: bool,

    /// Fail if VoicePackCatalog.kt differs from the generated output; writes nothing
    #[arg(long, requires = "sync_only")]
    pub check: bool,

    /// Skip ElevenLabs clip generation
    #[arg(long)]
    pub skip_audio: bool,

    /// Regenerate clips even if files already exist
    #[arg(long)]
    pub overwrite_audio: bool,

    /// Repository root that default paths are resolved against
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Path to voice_packs.json
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Path to VoicePackCatalog.kt
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Kotlin package of the generated catalog
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    pub catalog_package: String,

    /// Path to ClipId.kt
    #[arg(long)]
    pub clip_id_file: Option<PathBuf>,

    /// Path to NarrationScriptCatalog.kt
    #[arg(long)]
    pub script_catalog_file: Option<PathBuf>,

    /// Audio root directory
    #[arg(long)]
    pub audio_root: Option<PathBuf>,

    /// ElevenLabs TTS model id
    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// ElevenLabs stability [0,1]
    #[arg(long, default_value_t = DEFAULT_STABILITY)]
    pub stability: f32,

    /// ElevenLabs similarity boost [0,1]
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_BOOST)]
    pub similarity_boost: f32,

    /// Optional delay between clip requests (seconds)
    #[arg(long, default_value_t = 0.0)]
    pub request_delay: f64,

    /// ElevenLabs API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// ElevenLabs API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Timeout for each synthesis request (seconds)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Which steps this invocation runs.
    pub fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.sync_only {
            RunMode::SyncOnly
        } else if self.skip_audio {
            RunMode::SkipAudio
        } else {
            RunMode::Full
        }
    }

    /// Pack fields from the command line. Empty values count as not supplied.
    pub fn pack_update(&self) -> PackUpdate {
        PackUpdate {
            pack_id: supplied(&self.pack_id).unwrap_or_default(),
            display_name: supplied(&self.display_name),
            description: supplied(&self.description),
            voice_id: supplied(&self.voice_id),
            asset_dir: supplied(&self.asset_dir),
            const_name: supplied(&self.const_name),
            set_default: self.set_default,
        }
    }

    /// Resolve the full pipeline configuration.
    ///
    /// Paths not given explicitly default to their location under `--repo-root`.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::with_repo_root(&self.repo_root, self.pack_update());
        config.mode = self.mode();
        config.catalog_package = self.catalog_package.clone();

        override_path(&mut config.manifest_path, &self.manifest);
        override_path(&mut config.catalog_path, &self.catalog_file);

        let generate = &mut config.generate;
        override_path(&mut generate.clip_id_file, &self.clip_id_file);
        override_path(&mut generate.script_file, &self.script_catalog_file);
        override_path(&mut generate.audio_root, &self.audio_root);
        generate.voice_override = supplied(&self.voice_id);
        generate.api_key = supplied(&self.api_key);
        generate.model_id = self.model_id.clone();
        generate.voice_settings = VoiceSettings {
            stability: self.stability,
            similarity_boost: self.similarity_boost,
        };
        generate.overwrite = self.overwrite_audio;
        generate.request_delay = request_delay(self.request_delay);

        config
    }
}

fn supplied(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn override_path(target: &mut PathBuf, value: &Option<PathBuf>) {
    if let Some(path) = value {
        *target = path.clone();
    }
}

/// Seconds to a pause length; zero, negative, or non-finite means no pause.
fn request_delay(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}
