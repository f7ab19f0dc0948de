//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Every value has a default, so the
//! file is optional and may be sparse: a missing file yields the stock
//! configuration, which matches the project layout the site has always used.
//!
//! ## Config File Location
//!
//! `site.toml` lives in the project root, next to the `src/` tree:
//!
//! ```text
//! project/
//! ├── site.toml
//! └── src/
//!     ├── templates/
//!     ├── content/
//!     └── static/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! site_name = "The Nest"
//!
//! [paths]
//! source = "src"                       # Source tree root
//! output = "dist"                      # Output tree root
//! templates = "templates"              # Relative to source
//! content = "content"                  # Relative to source
//! static_dir = "static"                # Relative to source, mirrored to output
//! stylesheet = "static/sass/main.scss" # Relative to source
//! stylesheet_output = "static/css/main.css" # Relative to output
//!
//! [templates]
//! base = "base.html"
//! header = "header.html"
//! footer = "footer.html"
//!
//! [film]
//! site_name = "fi.lm.k&auml;ch"
//! content = "content/film"             # Relative to source
//! images = "static/img/film"           # Relative to source
//! output = "film"                      # Relative to output
//! url_prefix = "/static/img/film"
//! header = "header-film.html"          # Relative to templates
//! index_collection = "root"
//!
//! [film.categories]
//! collections = ["font", "egg", "homo", "startend", "meow"]
//! commissions = ["ropes", "slip", "tattoo", "agdw"]
//!
//! [assets]
//! recompress = true
//! jpeg_quality = 75
//!
//! [build]
//! minify = true
//!
//! [processing]
//! max_processes = 4                    # Omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILENAME: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// Passed explicitly into every stage of the build; nothing reads global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name used in page titles of the main site.
    pub site_name: String,
    pub paths: PathsConfig,
    pub templates: TemplatesConfig,
    pub film: FilmConfig,
    pub assets: AssetsConfig,
    pub build: BuildConfig,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "The Nest".to_string(),
            paths: PathsConfig::default(),
            templates: TemplatesConfig::default(),
            film: FilmConfig::default(),
            assets: AssetsConfig::default(),
            build: BuildConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.jpeg_quality == 0 || self.assets.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "assets.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.film.index_collection.is_empty() {
            return Err(ConfigError::Validation(
                "film.index_collection must not be empty".into(),
            ));
        }
        for (key, value) in [
            ("paths.templates", &self.paths.templates),
            ("paths.content", &self.paths.content),
            ("paths.static_dir", &self.paths.static_dir),
            ("paths.stylesheet_output", &self.paths.stylesheet_output),
            ("film.content", &self.film.content),
            ("film.images", &self.film.images),
            ("film.output", &self.film.output),
        ] {
            if Path::new(value).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be relative, got {value}"
                )));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve every configured location against the project root.
    pub fn resolve(&self, root: &Path) -> SitePaths {
        let source = root.join(&self.paths.source);
        let output = root.join(&self.paths.output);
        let templates = source.join(&self.paths.templates);
        SitePaths {
            base_template: templates.join(&self.templates.base),
            header: templates.join(&self.templates.header),
            film_header: templates.join(&self.film.header),
            footer: templates.join(&self.templates.footer),
            content: source.join(&self.paths.content),
            film_content: source.join(&self.film.content),
            film_images: source.join(&self.film.images),
            film_output: output.join(&self.film.output),
            static_source: source.join(&self.paths.static_dir),
            static_output: output.join(&self.paths.static_dir),
            stylesheet: source.join(&self.paths.stylesheet),
            stylesheet_output: output.join(&self.paths.stylesheet_output),
            output,
        }
    }
}

/// Locations of the source and output trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub source: String,
    pub output: String,
    pub templates: String,
    pub content: String,
    pub static_dir: String,
    pub stylesheet: String,
    pub stylesheet_output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "src".to_string(),
            output: "dist".to_string(),
            templates: "templates".to_string(),
            content: "content".to_string(),
            static_dir: "static".to_string(),
            stylesheet: "static/sass/main.scss".to_string(),
            stylesheet_output: "static/css/main.css".to_string(),
        }
    }
}

/// Template fragment filenames, relative to the templates directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub base: String,
    pub header: String,
    pub footer: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            base: "base.html".to_string(),
            header: "header.html".to_string(),
            footer: "footer.html".to_string(),
        }
    }
}

/// Film gallery sub-site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilmConfig {
    /// Site name used in film page titles. Inserted verbatim, so entities are allowed.
    pub site_name: String,
    /// Content pages that belong to the film sub-site.
    pub content: String,
    /// Root of the image collection tree.
    pub images: String,
    /// Output directory for collection pages.
    pub output: String,
    /// URL prefix under which the image root is served.
    pub url_prefix: String,
    /// Header fragment for film pages.
    pub header: String,
    /// Collection additionally written as `index.html`.
    pub index_collection: String,
    /// Named lists of collections, used for navigation highlighting.
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Default for FilmConfig {
    fn default() -> Self {
        let categories = BTreeMap::from([
            (
                "collections".to_string(),
                ["font", "egg", "homo", "startend", "meow"]
                    .map(String::from)
                    .to_vec(),
            ),
            (
                "commissions".to_string(),
                ["ropes", "slip", "tattoo", "agdw"].map(String::from).to_vec(),
            ),
        ]);
        Self {
            site_name: "fi.lm.k&auml;ch".to_string(),
            content: "content/film".to_string(),
            images: "static/img/film".to_string(),
            output: "film".to_string(),
            url_prefix: "/static/img/film".to_string(),
            header: "header-film.html".to_string(),
            index_collection: "root".to_string(),
            categories,
        }
    }
}

/// Static asset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Recompress JPEG and PNG files while mirroring the static tree.
    pub recompress: bool,
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            recompress: true,
            jpeg_quality: 75,
        }
    }
}

/// Page output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Minify every generated HTML page.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { minify: true }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel asset workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Every input and output location of a build, resolved against the project root.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub base_template: PathBuf,
    pub header: PathBuf,
    pub film_header: PathBuf,
    pub footer: PathBuf,
    pub content: PathBuf,
    pub film_content: PathBuf,
    pub film_images: PathBuf,
    pub film_output: PathBuf,
    pub static_source: PathBuf,
    pub static_output: PathBuf,
    pub stylesheet: PathBuf,
    pub stylesheet_output: PathBuf,
    pub output: PathBuf,
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse and validate a config from TOML text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from the project root.
///
/// Returns the stock defaults if the file doesn't exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// A documented `site.toml` containing every option at its default value.
pub fn stock_config_toml() -> &'static str {
    r##"# nestgen configuration
# All options are optional. Values shown are the defaults.

# Site name used in page titles of the main site.
site_name = "The Nest"

[paths]
# Source tree root, relative to the project root.
source = "src"
# Output tree root, relative to the project root.
output = "dist"
# Template fragments, relative to source.
templates = "templates"
# Content pages (*-content.html), relative to source.
content = "content"
# Static assets, relative to source. Mirrored to the same name under output.
static_dir = "static"
# Stylesheet entry point, relative to source.
stylesheet = "static/sass/main.scss"
# Compiled stylesheet, relative to output.
stylesheet_output = "static/css/main.css"

[templates]
# Base skeleton. Must contain {{PAGE_TITLE}} and the header, content and
# footer container markers.
base = "base.html"
header = "header.html"
footer = "footer.html"

[film]
# Site name used in film page titles. Inserted verbatim.
site_name = "fi.lm.k&auml;ch"
# Content pages of the film sub-site, relative to source.
content = "content/film"
# Image collection tree, relative to source.
images = "static/img/film"
# Collection pages, relative to output.
output = "film"
# URL under which the image collection tree is served.
url_prefix = "/static/img/film"
# Header fragment for film pages, relative to templates.
header = "header-film.html"
# Collection additionally written as index.html.
index_collection = "root"

[film.categories]
# Named lists of collections. Four-digit collection names are "years".
collections = ["font", "egg", "homo", "startend", "meow"]
commissions = ["ropes", "slip", "tattoo", "agdw"]

[assets]
# Recompress JPEG and PNG files while copying static assets.
recompress = true
# JPEG encoding quality (1-100).
jpeg_quality = 75

[build]
# Minify generated HTML pages.
minify = true

[processing]
# Maximum parallel asset workers. Omit for auto (= CPU cores).
# max_processes = 4
"##
}
