//! Kotlin rendering of the voice pack catalog.

use std::collections::HashMap;

use thiserror::Error;

use crate::manifest::Manifest;

/// Kotlin package the application expects the catalog in.
pub const DEFAULT_PACKAGE: &str = "com.avalonnarrator.domain.audio";

/// Marker line placed at the top of every generated file.
pub const GENERATED_MARKER: &str =
    "// AUTO-GENERATED by voice-pack-gen. Do not edit manually.";

/// Errors that can occur while rendering the catalog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("default_pack_id '{0}' not found in packs")]
    MissingDefault(String),
}

/// Renders a validated manifest into `VoicePackCatalog.kt`.
#[derive(Debug, Clone)]
pub struct CatalogRenderer {
    package: String,
}

impl CatalogRenderer {
    /// Create a renderer emitting into `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    /// Render the catalog source text.
    ///
    /// Output depends only on the manifest, in manifest order.
    pub fn render(&self, manifest: &Manifest) -> Result<String, CatalogError> {
        let const_by_id: HashMap<&str, &str> = manifest
            .packs
            .iter()
            .map(|pack| (pack.id.as_str(), pack.const_name.as_str()))
            .collect();

        let default_const = const_by_id
            .get(manifest.default_pack_id.as_str())
            .ok_or_else(|| CatalogError::MissingDefault(manifest.default_pack_id.clone()))?;

        Ok(self.write_catalog(manifest, default_const))
    }

    fn write_catalog(&self, manifest: &Manifest, default_const: &str) -> String {
        let mut out = KotlinSource::default();

        out.line(format!("package {}", self.package));
        out.blank();
        out.line(GENERATED_MARKER);
        out.line("typealias VoicePackId = String");
        out.blank();

        out.line("object VoicePackIds {");
        for pack in &manifest.packs {
            out.line(format!(
                "    const val {}: VoicePackId = \"{}\"",
                pack.const_name,
                kotlin_escape(&pack.id)
            ));
        }
        out.line("}");
        out.blank();

        out.line("object VoicePackCatalog {");
        out.line(format!(
            "    val defaultPackId: VoicePackId = VoicePackIds.{default_const}"
        ));
        out.blank();
        out.line("    private val packs: Map<VoicePackId, VoicePackDefinition> = listOf(");

        for pack in &manifest.packs {
            out.line("        VoicePackDefinition(");
            out.line(format!("            id = VoicePackIds.{},", pack.const_name));
            out.line(format!(
                "            displayName = \"{}\",",
                kotlin_escape(&pack.display_name)
            ));
            out.line(format!(
                "            description = \"{}\",",
                kotlin_escape(&pack.description)
            ));
            out.line("            clipFiles = ClipId.entries.associateWith { clip ->");
            out.line(format!(
                "                \"audio/{}/${{clip.name.lowercase()}}.mp3\"",
                kotlin_escape(pack.asset_dir())
            ));
            out.line("            },");
            out.line("        ),");
        }

        out.line("    ).associateBy { it.id }");
        out.blank();
        out.line("    fun all(): List<VoicePackDefinition> = packs.values.toList()");
        out.blank();
        out.line("    fun byId(id: VoicePackId): VoicePackDefinition? = packs[id]");
        out.line("}");

        out.0
    }
}

/// Line-oriented buffer for generated Kotlin.
#[derive(Default)]
struct KotlinSource(String);

impl KotlinSource {
    fn line(&mut self, text: impl AsRef<str>) {
        self.0.push_str(text.as_ref());
        self.0.push('\n');
    }

    fn blank(&mut self) {
        self.0.push('\n');
    }
}

impl Default for CatalogRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE)
    }
}

/// Render with the default package.
pub fn render(manifest: &Manifest) -> Result<String, CatalogError> {
    CatalogRenderer::default().render(manifest)
}

/// Escape text for a Kotlin string literal.
///
/// `$` is escaped as well, otherwise Kotlin would read it as a template.
pub fn kotlin_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// File name of a clip inside a pack's asset directory.
pub fn clip_file_name(clip_id: &str) -> String {
    format!("{}.mp3", clip_id.to_lowercase())
}

/// Resource path the generated catalog resolves for one clip.
pub fn clip_asset_path(asset_dir: &str, clip_id: &str) -> String {
    format!("audio/{asset_dir}/{}", clip_file_name(clip_id))
}
