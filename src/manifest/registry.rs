//! Integrity checks over the pack list.

use std::collections::HashSet;

use super::types::{Manifest, ManifestError, PackEntry};

/// Fail on the first pack id that appears twice, in list order.
pub fn ensure_unique_ids(packs: &[PackEntry]) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for pack in packs {
        if !seen.insert(pack.id.as_str()) {
            return Err(ManifestError::DuplicateId(pack.id.clone()));
        }
    }
    Ok(())
}

/// Fail on the first const name that appears twice, in list order.
pub fn ensure_unique_const_names(packs: &[PackEntry]) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for pack in packs {
        if !seen.insert(pack.const_name.as_str()) {
            return Err(ManifestError::DuplicateConstName(pack.const_name.clone()));
        }
    }
    Ok(())
}

/// Fail on the first pack whose const name is blank.
pub fn ensure_const_names_present(packs: &[PackEntry]) -> Result<(), ManifestError> {
    match packs.iter().find(|pack| pack.const_name.trim().is_empty()) {
        Some(pack) => Err(ManifestError::MissingConstName(pack.id.clone())),
        None => Ok(()),
    }
}

/// Run every registry check against the manifest.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    ensure_unique_ids(&manifest.packs)?;
    ensure_const_names_present(&manifest.packs)?;
    ensure_unique_const_names(&manifest.packs)
}
