//! Shared types produced by the build phases and consumed by [`output`](crate::output).

use serde::Serialize;
use std::path::PathBuf;

/// What a generated page was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A `-content.html` fragment.
    Content,
    /// An image collection rendered as a gallery.
    Collection,
    /// The film index, a copy of the configured index collection.
    FilmIndex,
}

/// One page written to the output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    pub kind: PageKind,
    /// Page name or collection key.
    pub source: String,
    pub title: String,
    /// Path relative to the output root.
    pub output: PathBuf,
}

/// Counts from mirroring the static tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Files copied byte-for-byte (never considered for recompression).
    pub copied: usize,
    /// Images written with their recompressed bytes.
    pub recompressed: usize,
    /// Images considered for recompression but written unchanged, because the
    /// result was not smaller or the file could not be decoded.
    pub kept_original: usize,
}

impl AssetReport {
    pub fn total(&self) -> usize {
        self.copied + self.recompressed + self.kept_original
    }
}

/// Everything a build produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub output: PathBuf,
    pub pages: Vec<GeneratedPage>,
    /// Compiled stylesheet, relative to the output root.
    pub stylesheet: PathBuf,
    pub assets: AssetReport,
}
