//! One end-to-end invocation: load the manifest, apply the requested pack
//! change, regenerate the catalog, then synthesize missing clips.

mod config;
mod run;

pub use config::{
    AUDIO_DOMAIN_DIR, CATALOG_FILE_NAME, CLIP_ID_FILE_NAME, DEFAULT_AUDIO_ROOT,
    DEFAULT_MANIFEST_PATH, PipelineConfig, RunMode, SCRIPT_CATALOG_FILE_NAME,
};
pub use run::{PipelineError, RunSummary, run};
