//! Resolved settings for one pipeline run.

use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_PACKAGE;
use crate::engine::GenerateOptions;
use crate::manifest::PackUpdate;

/// Manifest location relative to the repository root.
pub const DEFAULT_MANIFEST_PATH: &str = "scripts/voice_packs.json";

/// Directory of the application's audio domain sources.
pub const AUDIO_DOMAIN_DIR: &str = "composeApp/src/commonMain/kotlin/com/avalonnarrator/domain/audio";

pub const CATALOG_FILE_NAME: &str = "VoicePackCatalog.kt";
pub const CLIP_ID_FILE_NAME: &str = "ClipId.kt";
pub const SCRIPT_CATALOG_FILE_NAME: &str = "NarrationScriptCatalog.kt";

/// Audio resources root relative to the repository root.
pub const DEFAULT_AUDIO_ROOT: &str = "composeApp/src/commonMain/resources/audio";

/// How far a run goes after loading the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Upsert the pack, write the catalog, then synthesize missing clips.
    Full,
    /// Upsert the pack and write the catalog; no audio.
    SkipAudio,
    /// Only regenerate the catalog from the manifest as it is.
    SyncOnly,
    /// Render the catalog and compare it with the file on disk; write nothing.
    Check,
}

/// Everything [`run`](super::run) needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub manifest_path: PathBuf,
    pub catalog_path: PathBuf,
    pub catalog_package: String,
    pub update: PackUpdate,
    pub mode: RunMode,
    pub generate: GenerateOptions,
}

impl PipelineConfig {
    /// Configuration with every path at its default under `repo_root`.
    pub fn with_repo_root(repo_root: &Path, update: PackUpdate) -> Self {
        let domain_dir = repo_root.join(AUDIO_DOMAIN_DIR);

        Self {
            manifest_path: repo_root.join(DEFAULT_MANIFEST_PATH),
            catalog_path: domain_dir.join(CATALOG_FILE_NAME),
            catalog_package: DEFAULT_PACKAGE.to_string(),
            update,
            mode: RunMode::Full,
            generate: GenerateOptions::new(
                repo_root.join(DEFAULT_AUDIO_ROOT),
                domain_dir.join(CLIP_ID_FILE_NAME),
                domain_dir.join(SCRIPT_CATALOG_FILE_NAME),
            ),
        }
    }

    /// Whether this run persists a pack upsert.
    pub fn mutates_manifest(&self) -> bool {
        matches!(self.mode, RunMode::Full | RunMode::SkipAudio)
    }
}
