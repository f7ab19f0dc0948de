//! Image collection scanning.
//!
//! Walks the film image tree and groups images by the directory they live in.
//! Each directory holding at least one image becomes a [`Collection`], keyed by
//! its path relative to the scan root:
//!
//! ```text
//! static/img/film/                 Collections
//! ├── 1a.jpg                       root        → [1a.jpg, 1b.jpg]
//! ├── 1b.jpg
//! ├── 2019/                        2019        → [2.jpg, 10.jpg]
//! │   ├── 10.jpg
//! │   └── 2.jpg
//! └── commissions/                 (no images: no collection)
//!     └── ropes/                   commissions/ropes → [1a.jpg]
//!         └── 1a.jpg
//! ```
//!
//! ## Rules
//!
//! - Images are recognized by extension: jpg, jpeg, png, gif, webp, svg
//!   (case-insensitive).
//! - Every subdirectory is scanned, whether or not its parent held images.
//! - Images within a collection are in natural order (see
//!   [`naming::natural_cmp`](crate::naming::natural_cmp)).
//! - Dot-prefixed files are treated like any other: only the extension counts.
//! - A symlinked image counts as an image; a symlinked directory is not
//!   descended into, so link cycles cannot recurse.
//! - A missing scan root is not an error: the result is simply empty, so a
//!   partially populated asset tree still builds.

use crate::naming::natural_cmp;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the collection formed by images directly in the scan root.
pub const ROOT_COLLECTION: &str = "root";

/// Extensions recognized as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A group of images found together in one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    /// Collection key: relative directory with `/` separators, or [`ROOT_COLLECTION`].
    pub name: String,
    /// Relative directory the images live in; empty for the root collection.
    pub source_dir: String,
    /// Image filenames in natural order.
    pub images: Vec<String>,
}

impl Collection {
    /// Public URL of one of this collection's images.
    pub fn image_url(&self, url_prefix: &str, filename: &str) -> String {
        let prefix = url_prefix.trim_end_matches('/');
        if self.source_dir.is_empty() {
            format!("{prefix}/{filename}")
        } else {
            format!("{prefix}/{}/{filename}", self.source_dir)
        }
    }
}

/// Collections keyed by name.
pub type Collections = BTreeMap<String, Collection>;

/// Scan `root` for image collections.
pub fn scan_collections(root: &Path) -> Result<Collections, ScanError> {
    let mut collections = Collections::new();

    if !root.is_dir() {
        log::info!("Image folder does not exist: {}", root.display());
        return Ok(collections);
    }

    scan_directory(root, "", &mut collections)?;
    Ok(collections)
}

fn scan_directory(
    path: &Path,
    relative: &str,
    collections: &mut Collections,
) -> Result<(), ScanError> {
    let entries = collect_entries(path)?;

    let mut images: Vec<String> = entries
        .iter()
        .filter(|e| e.is_image())
        .map(|e| file_name(&e.path))
        .collect();
    images.sort_by(|a, b| natural_cmp(a, b));

    if !images.is_empty() {
        let name = if relative.is_empty() {
            ROOT_COLLECTION
        } else {
            relative
        };
        log::info!("Found collection: {name} with {} images", images.len());

        let previous = collections.insert(
            name.to_string(),
            Collection {
                name: name.to_string(),
                source_dir: relative.to_string(),
                images,
            },
        );
        if let Some(previous) = previous {
            log::warn!(
                "Collection name '{name}' is used by two directories; '{}' is replaced by '{relative}'",
                previous.source_dir
            );
        }
    }

    for subdir in entries.iter().filter(|e| e.kind == EntryKind::Dir) {
        let dir_name = file_name(&subdir.path);
        let child = if relative.is_empty() {
            dir_name
        } else {
            format!("{relative}/{dir_name}")
        };
        scan_directory(&subdir.path, &child, collections)?;
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Other,
}

struct Entry {
    path: PathBuf,
    kind: EntryKind,
}

impl Entry {
    fn is_image(&self) -> bool {
        self.kind == EntryKind::File && has_image_extension(&self.path)
    }
}

/// Directory entries sorted by path. Symlinks resolve to `File` only when
/// they point at a file; linked directories are `Other`.
fn collect_entries(path: &Path) -> Result<Vec<Entry>, ScanError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        entries.push(Entry {
            path: entry.path(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Whether the path carries a recognized image extension.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
