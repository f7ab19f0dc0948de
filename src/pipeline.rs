//! Build orchestration.
//!
//! A build runs three phases in order, stopping at the first failure:
//!
//! ```text
//! 1. Pages       templates + content + film images  →  dist/**/*.html
//! 2. Stylesheet  static/sass/main.scss              →  dist/static/css/main.css
//! 3. Assets      static/**                          →  dist/static/**
//! ```
//!
//! Assets run last and are fully awaited, so a successful build always leaves a
//! complete output tree.

use crate::assets::{AssetError, MirrorOptions, mirror_assets};
use crate::config::{ConfigError, SiteConfig, effective_threads};
use crate::discover::{ContentFile, DiscoverError, discover_content};
use crate::imaging::{ImageBackend, Quality, RustBackend};
use crate::pages::{PageError, build_pages};
use crate::scan::{Collections, ScanError, scan_collections};
use crate::stylesheet::{StylesheetError, compile_stylesheet};
use crate::types::BuildReport;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pages(#[from] PageError),
    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Build the site under `root` with the production image backend.
pub fn build(root: &Path, config: &SiteConfig) -> Result<BuildReport, BuildError> {
    build_with_backend(root, config, &RustBackend::new())
}

/// Build the site under `root`, recompressing images with `backend`.
pub fn build_with_backend(
    root: &Path,
    config: &SiteConfig,
    backend: &dyn ImageBackend,
) -> Result<BuildReport, BuildError> {
    config.validate()?;
    let paths = config.resolve(root);

    log::info!("Building pages into {}", paths.output.display());
    let pages = build_pages(config, &paths)?;

    log::info!("Compiling {}", paths.stylesheet.display());
    compile_stylesheet(&paths.stylesheet, &paths.stylesheet_output)?;

    log::info!("Mirroring {}", paths.static_source.display());
    let options = MirrorOptions {
        recompress: config.assets.recompress,
        quality: Quality::new(config.assets.jpeg_quality),
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(effective_threads(&config.processing))
        .build()?;
    let assets = pool.install(|| {
        mirror_assets(&paths.static_source, &paths.static_output, backend, &options)
    })?;

    let stylesheet = paths
        .stylesheet_output
        .strip_prefix(&paths.output)
        .unwrap_or(&paths.stylesheet_output)
        .to_path_buf();

    Ok(BuildReport {
        output: paths.output,
        pages,
        stylesheet,
        assets,
    })
}

/// What a build would read, without writing anything.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub content: Vec<ContentFile>,
    pub collections: Collections,
}

/// Discover content pages and image collections under `root`.
pub fn scan_site(root: &Path, config: &SiteConfig) -> Result<ScanSummary, BuildError> {
    config.validate()?;
    let paths = config.resolve(root);
    Ok(ScanSummary {
        content: discover_content(&paths.content)?,
        collections: scan_collections(&paths.film_images)?,
    })
}
