//! Manifest record types and errors.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading, saving, or mutating the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate pack id in manifest: {0}")]
    DuplicateId(String),

    #[error("Duplicate const_name in manifest: {0}")]
    DuplicateConstName(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Pack {0} has no const_name")]
    MissingConstName(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Root record persisted in `voice_packs.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default)]
    pub default_pack_id: String,

    #[serde(default)]
    pub packs: Vec<PackEntry>,

    /// Keys this tool does not know about, kept so hand edits survive a save.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One voice pack definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackEntry {
    pub id: String,

    #[serde(default)]
    pub const_name: String,

    pub display_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub asset_dir: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Manifest {
    /// Find a pack by its id.
    pub fn pack(&self, id: &str) -> Option<&PackEntry> {
        self.packs.iter().find(|pack| pack.id == id)
    }
}

impl PackEntry {
    /// Directory under the audio root holding this pack's clips.
    ///
    /// Falls back to the pack id when the manifest leaves it blank.
    pub fn asset_dir(&self) -> &str {
        if self.asset_dir.is_empty() {
            &self.id
        } else {
            &self.asset_dir
        }
    }
}
