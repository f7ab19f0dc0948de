//! Page assembly: content pages and film collection galleries.
//!
//! Every page is the base template with four things filled in: a title, a
//! header fragment, the page content and the footer fragment. The fragments are
//! read once per build into [`SiteFragments`]; the base template is parsed at
//! the same time so a broken template fails the build before anything is
//! written.
//!
//! ## Content pages
//!
//! Each `-content.html` file under the content root becomes
//! `<output>/<relative dir>/<name>.html`. Files under the film content subtree
//! use the film header (highlighted for the page) and the film site name; all
//! others use the main header.
//!
//! ## Collection pages
//!
//! Each image collection becomes `<output>/film/<collection>.html`, with the
//! gallery block as its content and the film header highlighted for the
//! collection's category. The index collection is also written to
//! `<output>/film/index.html`.
//!
//! Pages are written in build order, so when two pages share an output path
//! (a collection named like a film content page, or a collection named
//! `index`) the later one wins and a warning names both sources.

use crate::config::{SiteConfig, SitePaths};
use crate::discover::{ContentFile, DiscoverError, discover_content};
use crate::gallery::render_gallery;
use crate::header::{ActivePage, collection_category, highlight_active};
use crate::minify::minify_page;
use crate::naming::page_title;
use crate::pairing::pair_images;
use crate::scan::{Collection, ScanError, scan_collections};
use crate::template::{Fragments, Template, TemplateError};
use crate::types::{GeneratedPage, PageKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid template {path}: {source}")]
    Template {
        path: PathBuf,
        source: TemplateError,
    },
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// The shared pieces every page is assembled from.
#[derive(Debug, Clone)]
pub struct SiteFragments {
    pub template: Template,
    pub header: String,
    pub film_header: String,
    pub footer: String,
}

impl SiteFragments {
    pub fn load(paths: &SitePaths) -> Result<Self, PageError> {
        let base = read_fragment(&paths.base_template)?;
        let template = Template::parse(&base).map_err(|source| PageError::Template {
            path: paths.base_template.clone(),
            source,
        })?;
        Ok(Self {
            template,
            header: read_fragment(&paths.header)?,
            film_header: read_fragment(&paths.film_header)?,
            footer: read_fragment(&paths.footer)?,
        })
    }
}

fn read_fragment(path: &Path) -> Result<String, PageError> {
    std::fs::read_to_string(path).map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds and writes pages for one site.
pub struct PageBuilder<'a> {
    config: &'a SiteConfig,
    paths: &'a SitePaths,
    fragments: SiteFragments,
}

impl<'a> PageBuilder<'a> {
    /// Load the fragments and parse the base template.
    pub fn new(config: &'a SiteConfig, paths: &'a SitePaths) -> Result<Self, PageError> {
        Ok(Self {
            config,
            paths,
            fragments: SiteFragments::load(paths)?,
        })
    }

    /// One page per `-content.html` file under the content root.
    pub fn build_content_pages(&self) -> Result<Vec<GeneratedPage>, PageError> {
        let files = discover_content(&self.paths.content)?;
        log::info!("Building {} content pages", files.len());

        files
            .iter()
            .map(|file| self.build_content_page(file))
            .collect()
    }

    fn build_content_page(&self, file: &ContentFile) -> Result<GeneratedPage, PageError> {
        let content = read_fragment(&file.path)?;

        let (title, header) = if file.path.starts_with(&self.paths.film_content) {
            let active = ActivePage {
                page: Some(file.name.as_str()),
                collection: None,
            };
            (
                page_title(&self.config.film.site_name, &file.name),
                highlight_active(&self.fragments.film_header, &active),
            )
        } else {
            (
                page_title(&self.config.site_name, &file.name),
                self.fragments.header.clone(),
            )
        };

        let output = file.output_path(&self.paths.output);
        self.write_page(&output, &title, &header, &content)?;
        log::debug!("{} -> {}", file.path.display(), output.display());

        Ok(GeneratedPage {
            kind: PageKind::Content,
            source: file.name.clone(),
            title,
            output: self.relative(&output),
        })
    }

    /// One gallery page per image collection, plus the film index.
    pub fn build_collection_pages(&self) -> Result<Vec<GeneratedPage>, PageError> {
        let collections = scan_collections(&self.paths.film_images)?;
        log::info!("Building {} collection pages", collections.len());

        let mut pages = Vec::with_capacity(collections.len() + 1);
        for collection in collections.values() {
            pages.push(self.build_collection_page(collection, PageKind::Collection)?);
            if collection.name == self.config.film.index_collection {
                pages.push(self.build_collection_page(collection, PageKind::FilmIndex)?);
            }
        }

        if !collections.contains_key(&self.config.film.index_collection) {
            log::warn!(
                "Index collection '{}' not found, no film index written",
                self.config.film.index_collection
            );
        }
        Ok(pages)
    }

    fn build_collection_page(
        &self,
        collection: &Collection,
        kind: PageKind,
    ) -> Result<GeneratedPage, PageError> {
        let pairs = pair_images(&collection.images);
        let content = render_gallery(collection, &pairs, &self.config.film.url_prefix);

        let active = ActivePage {
            page: collection_category(&collection.name, &self.config.film.categories),
            collection: Some(collection.name.as_str()),
        };
        let header = highlight_active(&self.fragments.film_header, &active);
        let title = page_title(&self.config.film.site_name, &collection.name);

        let file_name = match kind {
            PageKind::FilmIndex => "index".to_string(),
            _ => collection.name.clone(),
        };
        let output = self.paths.film_output.join(format!("{file_name}.html"));
        self.write_page(&output, &title, &header, &content.into_string())?;

        Ok(GeneratedPage {
            kind,
            source: collection.name.clone(),
            title,
            output: self.relative(&output),
        })
    }

    fn write_page(
        &self,
        output: &Path,
        title: &str,
        header: &str,
        content: &str,
    ) -> Result<(), PageError> {
        let html = self.fragments.template.render(&Fragments {
            title,
            header,
            content,
            footer: &self.fragments.footer,
        });
        let bytes = minify_page(&html, &self.config.build);

        let write_err = |source| PageError::Write {
            path: output.to_path_buf(),
            source,
        };
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(output, bytes).map_err(write_err)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.paths.output)
            .unwrap_or(path)
            .to_path_buf()
    }
}

/// Build every content and collection page.
pub fn build_pages(config: &SiteConfig, paths: &SitePaths) -> Result<Vec<GeneratedPage>, PageError> {
    let builder = PageBuilder::new(config, paths)?;
    let mut pages = builder.build_content_pages()?;
    pages.extend(builder.build_collection_pages()?);

    for (output, sources) in colliding_outputs(&pages) {
        log::warn!(
            "{} is written by several pages ({}); the last one wins",
            output.display(),
            sources.join(", ")
        );
    }
    Ok(pages)
}

/// Output paths claimed by more than one page, with the claiming sources in
/// write order.
fn colliding_outputs(pages: &[GeneratedPage]) -> Vec<(&Path, Vec<&str>)> {
    let mut by_output: BTreeMap<&Path, Vec<&str>> = BTreeMap::new();
    for page in pages {
        by_output
            .entry(page.output.as_path())
            .or_default()
            .push(page.source.as_str());
    }
    by_output
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .collect()
}
