//! Manifest → catalog → audio, in that order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::Backend;
use crate::catalog::{CatalogError, CatalogRenderer};
use crate::engine::{ClipGenerator, GenerateError, GenerateReport};
use crate::manifest::{self, ManifestError};

use super::config::{PipelineConfig, RunMode};

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Catalog is out of date: {0}")]
    CatalogOutOfDate(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a completed run touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Set when the manifest was rewritten.
    pub manifest_saved: Option<PathBuf>,
    pub catalog_path: PathBuf,
    /// False in check mode, where the catalog is only compared.
    pub catalog_written: bool,
    pub audio: Option<GenerateReport>,
}

/// Run one invocation.
///
/// Steps are not rolled back: if synthesis fails, the manifest and catalog
/// written before it stay on disk.
pub fn run<B: Backend>(
    config: &PipelineConfig,
    generator: &ClipGenerator<B>,
) -> Result<RunSummary, PipelineError> {
    let mut manifest = manifest::load(&config.manifest_path)?;
    let mut summary = RunSummary {
        catalog_path: config.catalog_path.clone(),
        ..Default::default()
    };

    if config.mutates_manifest() {
        manifest::upsert(&mut manifest, &config.update)?;
        manifest::save(&config.manifest_path, &manifest)?;
        tracing::info!(path = %config.manifest_path.display(), "wrote manifest");
        summary.manifest_saved = Some(config.manifest_path.clone());
    } else {
        manifest::validate(&manifest)?;
    }

    let catalog = CatalogRenderer::new(config.catalog_package.as_str()).render(&manifest)?;

    if config.mode == RunMode::Check {
        let on_disk = read_existing(&config.catalog_path)?;
        if on_disk.as_deref() != Some(catalog.as_str()) {
            return Err(PipelineError::CatalogOutOfDate(config.catalog_path.clone()));
        }
        tracing::info!(path = %config.catalog_path.display(), "catalog is up to date");
        return Ok(summary);
    }

    manifest::write_atomic(&config.catalog_path, catalog.as_bytes()).map_err(|source| {
        PipelineError::Io {
            path: config.catalog_path.clone(),
            source,
        }
    })?;
    tracing::info!(path = %config.catalog_path.display(), "wrote catalog");
    summary.catalog_written = true;

    if config.mode != RunMode::Full {
        return Ok(summary);
    }

    let report = generator.generate_for(&manifest, &config.update.pack_id, &config.generate)?;
    summary.audio = Some(report);

    Ok(summary)
}

/// Current contents of `path`, or `None` when it does not exist yet.
fn read_existing(path: &Path) -> Result<Option<String>, PipelineError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PipelineError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
