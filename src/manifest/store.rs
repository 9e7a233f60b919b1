//! Manifest persistence.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::{Manifest, ManifestError};

/// Load the manifest at `path`.
///
/// A missing file yields an empty manifest so the first run can create it.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "manifest not found; starting empty");
        return Ok(Manifest::default());
    }

    let json = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save the manifest as pretty-printed JSON with a trailing newline.
pub fn save(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');

    write_atomic(path, json.as_bytes()).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), packs = manifest.packs.len(), "manifest saved");
    Ok(())
}

/// Write `contents` to `path` through a sibling temp file and a rename.
///
/// Parent directories are created as needed. The temp file is removed if
/// either step fails.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
