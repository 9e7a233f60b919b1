//! Create-or-update of a single pack entry.

use std::sync::LazyLock;

use regex::Regex;

use super::registry;
use super::types::{Manifest, ManifestError, PackEntry};

/// Const name used when an id has no alphanumeric characters at all.
pub const PLACEHOLDER_CONST_NAME: &str = "VOICE_PACK";

/// Prefix applied when a derived const name would start with a digit.
pub const DIGIT_PREFIX: &str = "PACK_";

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

/// Fields supplied for one upsert. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackUpdate {
    pub pack_id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub voice_id: Option<String>,
    pub asset_dir: Option<String>,
    pub const_name: Option<String>,
    pub set_default: bool,
}

impl PackUpdate {
    /// Create an update targeting `pack_id` with nothing else supplied.
    pub fn new(pack_id: impl Into<String>) -> Self {
        Self {
            pack_id: pack_id.into(),
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_asset_dir(mut self, asset_dir: impl Into<String>) -> Self {
        self.asset_dir = Some(asset_dir.into());
        self
    }

    pub fn with_const_name(mut self, const_name: impl Into<String>) -> Self {
        self.const_name = Some(const_name.into());
        self
    }

    /// Make this pack the catalog default.
    pub fn as_default(mut self) -> Self {
        self.set_default = true;
        self
    }
}

/// Derive a Kotlin constant name from a pack id.
///
/// `"rain-bird 2"` becomes `RAIN_BIRD_2`, `"7seas"` becomes `PACK_7SEAS`.
pub fn sanitize_const_name(pack_id: &str) -> String {
    let collapsed = NON_ALPHANUMERIC.replace_all(pack_id, "_");
    let sanitized = collapsed.trim_matches('_').to_uppercase();

    if sanitized.is_empty() {
        return PLACEHOLDER_CONST_NAME.to_string();
    }
    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("{DIGIT_PREFIX}{sanitized}");
    }
    sanitized
}

/// Apply `update` to `manifest`.
///
/// The change is staged on a copy and only committed once the registry
/// checks pass, so a failed upsert leaves `manifest` untouched.
pub fn upsert(manifest: &mut Manifest, update: &PackUpdate) -> Result<(), ManifestError> {
    if update.pack_id.is_empty() {
        return Err(ManifestError::MissingField("pack_id"));
    }

    let mut staged = manifest.clone();
    let pack_id = update.pack_id.as_str();

    match staged.packs.iter_mut().find(|pack| pack.id == pack_id) {
        Some(existing) => apply_to_existing(existing, update),
        None => {
            let created = create_entry(update)?;
            tracing::info!(pack = %created.id, const_name = %created.const_name, "adding voice pack");
            staged.packs.push(created);
        }
    }

    if update.set_default {
        staged.default_pack_id = pack_id.to_string();
    }

    if staged.default_pack_id.is_empty()
        && let Some(first) = staged.packs.first()
    {
        staged.default_pack_id = first.id.clone();
    }

    registry::validate(&staged)?;

    *manifest = staged;
    Ok(())
}

fn create_entry(update: &PackUpdate) -> Result<PackEntry, ManifestError> {
    let display_name = update
        .display_name
        .clone()
        .ok_or(ManifestError::MissingField("display_name"))?;

    Ok(PackEntry {
        id: update.pack_id.clone(),
        const_name: update
            .const_name
            .clone()
            .unwrap_or_else(|| sanitize_const_name(&update.pack_id)),
        display_name,
        description: update.description.clone().unwrap_or_default(),
        asset_dir: update
            .asset_dir
            .clone()
            .unwrap_or_else(|| update.pack_id.clone()),
        voice_id: update.voice_id.clone(),
        extra: Default::default(),
    })
}

fn apply_to_existing(pack: &mut PackEntry, update: &PackUpdate) {
    tracing::info!(pack = %pack.id, "updating voice pack");

    if let Some(const_name) = &update.const_name {
        pack.const_name = const_name.clone();
    } else if pack.const_name.is_empty() {
        pack.const_name = sanitize_const_name(&pack.id);
    }
    if let Some(display_name) = &update.display_name {
        pack.display_name = display_name.clone();
    }
    if let Some(description) = &update.description {
        pack.description = description.clone();
    }
    if let Some(asset_dir) = &update.asset_dir {
        pack.asset_dir = asset_dir.clone();
    }
    if let Some(voice_id) = &update.voice_id {
        pack.voice_id = Some(voice_id.clone());
    }
}
