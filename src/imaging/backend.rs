//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the asset pipeline and
//! pixel work. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! [`MockBackend`](tests::MockBackend).

use super::params::RecompressParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {0}")]
    Decode(String),
    #[error("Failed to encode {0}")]
    Encode(String),
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared by every rayon worker.
pub trait ImageBackend: Sync {
    /// Decode the source image and re-encode it, returning the encoded bytes.
    ///
    /// Nothing is written: the caller decides whether the result is worth
    /// keeping.
    fn recompress(&self, params: &RecompressParams) -> Result<Vec<u8>, BackendError>;
}
