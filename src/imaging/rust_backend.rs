//! Pure Rust recompression backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, best compression, adaptive filter |
//!
//! PNG re-encoding is lossless; only JPEG quality is tunable. EXIF
//! orientation and colour profiles survive through
//! [`carry_metadata`](super::metadata::carry_metadata).

use super::backend::{BackendError, ImageBackend};
use super::metadata::carry_metadata;
use super::params::{RecompressFormat, RecompressParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an image already read from `path`.
fn load_image(path: &Path, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))?;
    Ok(out)
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn recompress(&self, params: &RecompressParams) -> Result<Vec<u8>, BackendError> {
        let source = std::fs::read(&params.source)?;
        let img = load_image(&params.source, &source)?;
        let encoded = match params.format {
            RecompressFormat::Jpeg => encode_jpeg(&img, params.quality.value() as u8),
            RecompressFormat::Png => encode_png(&img),
        }
        .map_err(|e| BackendError::Encode(format!("{}: {}", params.source.display(), e)))?;
        Ok(carry_metadata(&source, encoded, params.format))
    }
}
