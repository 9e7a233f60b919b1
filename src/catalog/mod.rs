//! Generated voice pack catalog.
//!
//! The catalog is a Kotlin source file derived entirely from the manifest.
//! It is regenerated wholesale on every run and never patched in place.

mod renderer;

pub use renderer::{
    CatalogError, CatalogRenderer, DEFAULT_PACKAGE, GENERATED_MARKER, clip_asset_path,
    clip_file_name, kotlin_escape, render,
};
