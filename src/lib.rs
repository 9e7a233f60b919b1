//! voice-pack-gen: voice pack manifest, catalog generation, and clip synthesis.
//!
//! This crate keeps three artifacts of a narration app consistent: the
//! `voice_packs.json` manifest, the generated `VoicePackCatalog.kt`, and the
//! per-pack MP3 clips synthesized through ElevenLabs.

pub mod backend;
pub mod catalog;
pub mod cli;
pub mod clips;
pub mod engine;
pub mod manifest;
pub mod pipeline;
