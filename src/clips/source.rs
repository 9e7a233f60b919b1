//! Extraction of clip ids and narration lines from the application sources.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static CLIP_ENUM_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)enum\s+class\s+ClipId\s*\{(?P<body>.*?)\}").expect("valid regex")
});

static CLIP_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*([A-Z0-9_]+)\s*[,;]?\s*$").expect("valid regex"));

static SCRIPTED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"ClipId\.([A-Z0-9_]+)\s+to\s+"((?:\\.|[^"\\])*)"\s*,"#).expect("valid regex")
});

/// Errors that can occur while reading the clip sources.
#[derive(Error, Debug)]
pub enum ClipSourceError {
    #[error("Could not parse ClipId enum from {0}")]
    Parse(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Clip ids in declaration order, plus any scripted narration lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipCatalog {
    pub clip_ids: Vec<String>,
    pub lines: BTreeMap<String, String>,
}

impl ClipCatalog {
    /// Read the clip enum and the narration script from disk.
    pub fn load(clip_id_file: &Path, script_file: &Path) -> Result<Self, ClipSourceError> {
        let enum_source = read(clip_id_file)?;
        let clip_ids = list_clip_ids(&enum_source)
            .map_err(|_| ClipSourceError::Parse(clip_id_file.display().to_string()))?;

        let script_source = read(script_file)?;
        let lines = scripted_lines(&script_source);

        tracing::debug!(
            clips = clip_ids.len(),
            scripted = lines.len(),
            "loaded clip catalog"
        );

        Ok(Self { clip_ids, lines })
    }

    /// Text to speak for a clip: the scripted line, or one derived from the id.
    pub fn line_for(&self, clip_id: &str) -> String {
        self.lines
            .get(clip_id)
            .cloned()
            .unwrap_or_else(|| fallback_line(clip_id))
    }
}

fn read(path: &Path) -> Result<String, ClipSourceError> {
    fs::read_to_string(path).map_err(|source| ClipSourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// List the entries of `enum class ClipId { ... }` in declaration order.
pub fn list_clip_ids(source: &str) -> Result<Vec<String>, ClipSourceError> {
    let body = CLIP_ENUM_BODY
        .captures(source)
        .and_then(|caps| caps.name("body"))
        .ok_or_else(|| ClipSourceError::Parse("input".to_string()))?;

    Ok(CLIP_ENTRY
        .captures_iter(body.as_str())
        .map(|caps| caps[1].to_string())
        .collect())
}

/// Map each `ClipId.X to "..."` pair to its unescaped text.
///
/// Clips without a scripted line are simply absent.
pub fn scripted_lines(source: &str) -> BTreeMap<String, String> {
    SCRIPTED_LINE
        .captures_iter(source)
        .map(|caps| (caps[1].to_string(), unescape_kotlin(&caps[2])))
        .collect()
}

/// Human-readable sentence for a clip with no scripted line.
///
/// `MERLIN_WAKE_UP` becomes `Merlin Wake Up`.
pub fn fallback_line(clip_id: &str) -> String {
    clip_id
        .to_lowercase()
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decode the escape sequences of a Kotlin string literal body.
///
/// Unknown escapes are kept as written.
pub fn unescape_kotlin(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some(quoted @ ('"' | '\'' | '\\' | '$')) => out.push(quoted),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
