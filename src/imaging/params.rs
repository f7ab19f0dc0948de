//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the asset pipeline (which decides which files to
//! recompress) and the [`backend`](super::backend) (which does the pixel work).
//!
//! - [`Quality`]: lossy encoding quality (1-100, default 75). Clamped on construction.
//! - [`RecompressFormat`]: the formats that are re-encoded rather than copied.
//! - [`RecompressParams`]: everything needed for one recompression.

use std::path::{Path, PathBuf};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Output format of a recompression. Always the same as the input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecompressFormat {
    /// Lossy re-encode at the configured quality.
    Jpeg,
    /// Lossless re-encode with maximum compression.
    Png,
}

impl RecompressFormat {
    /// Format for a file, by extension. `None` means the file is copied as-is.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Parameters for recompressing one image.
#[derive(Debug, Clone, PartialEq)]
pub struct RecompressParams {
    pub source: PathBuf,
    pub format: RecompressFormat,
    pub quality: Quality,
}
