//! Clip ids and scripted narration lines owned by the application.
//!
//! Both inputs are Kotlin sources (`ClipId.kt` and
//! `NarrationScriptCatalog.kt`); this module only reads them.

mod source;

pub use source::{
    ClipCatalog, ClipSourceError, fallback_line, list_clip_ids, scripted_lines, unescape_kotlin,
};
