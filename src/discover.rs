//! Content page discovery.
//!
//! Walks the content tree and returns every `*-content.html` fragment, together
//! with the directory it sits in relative to the content root. The page builder
//! mirrors that directory into the output tree:
//!
//! ```text
//! src/content/                      dist/
//! ├── index-content.html      →     ├── index.html
//! ├── about-content.html      →     ├── about.html
//! └── film/                         └── film/
//!     └── about-content.html  →         └── about.html
//! ```
//!
//! Any other file in the tree is ignored. The returned list is sorted by path;
//! callers must not rely on any particular order.

use crate::naming::content_page_name;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Content directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A renderable content fragment found in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentFile {
    /// Full path to the fragment.
    pub path: PathBuf,
    /// Logical page name: filename with the content suffix removed.
    pub name: String,
    /// Directory of the fragment relative to the content root (empty at the root).
    pub relative_dir: PathBuf,
}

impl ContentFile {
    /// Where the finished page for this fragment is written.
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        output_root
            .join(&self.relative_dir)
            .join(format!("{}.html", self.name))
    }
}

/// Find every content fragment beneath `root`.
///
/// Fails if `root` does not exist; a missing content tree is a broken project.
pub fn discover_content(root: &Path) -> Result<Vec<ContentFile>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::MissingRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().and_then(content_page_name) else {
            continue;
        };
        let relative_dir = entry
            .path()
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        files.push(ContentFile {
            path: entry.path().to_path_buf(),
            name: name.to_string(),
            relative_dir,
        });
    }

    log::debug!("Found {} content files in {}", files.len(), root.display());
    Ok(files)
}
