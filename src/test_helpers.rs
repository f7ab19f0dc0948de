//! Shared test utilities for the nestgen test suite.
//!
//! Provides a fixture site, image generators and lookup helpers that panic with
//! a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = SiteConfig::default();
//! let pages = build_pages(&config, &config.resolve(tmp.path())).unwrap();
//!
//! let index = find_page(&pages, "film/index.html");
//! assert_eq!(index.source, "root");
//! let html = read_output(tmp.path(), "film/index.html");
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Collection, Collections};
use crate::types::GeneratedPage;

// =========================================================================
// Fixture setup
// =========================================================================

/// Film images written into the fixture site, relative to the image root.
pub const FIXTURE_IMAGES: &[&str] = &[
    "1a.jpg",
    "1b.jpg",
    "2a.jpg",
    "3.jpg",
    "2023/1a.jpg",
    "2023/1b.jpg",
    "ropes/1a.jpg",
    "ropes/2.png",
];

/// Copy `fixtures/site/` to a temp directory, add film images, and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();

    let images = tmp.path().join("src/static/img/film");
    for rel in FIXTURE_IMAGES {
        let path = images.join(rel);
        if rel.ends_with(".png") {
            create_test_png(&path, 40, 30);
        } else {
            create_test_jpeg(&path, 120, 90, 95);
        }
    }
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Image generators
// =========================================================================

/// Write a noisy RGB JPEG. Busy pixels keep high-quality files large.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32, quality: u8) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        let n = x.wrapping_mul(7919) ^ y.wrapping_mul(104_729) ^ (x * y);
        Rgb([(n % 256) as u8, ((n >> 3) % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut out = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
        .unwrap();
    std::fs::write(path, out).unwrap();
}

/// Big-endian TIFF body of an Exif block holding a single Orientation=6 tag.
pub const EXIF_ORIENTATION_6: &[u8] = &[
    b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // header, IFD0 at 8
    0x00, 0x01, // one entry
    0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00, // Orientation
    0x00, 0x00, 0x00, 0x00, // no next IFD
];

/// Insert an APP1 Exif segment carrying [`EXIF_ORIENTATION_6`] right after SOI.
pub fn add_exif_segment(jpeg: &[u8]) -> Vec<u8> {
    assert!(jpeg.starts_with(&[0xFF, 0xD8]), "not a JPEG");
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(EXIF_ORIENTATION_6);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Write a gradient RGBA PNG with default compression.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 6 % 256) as u8, (y * 8 % 256) as u8, 128, 200])
    });
    img.save(path).unwrap();
}

// =========================================================================
// Lookups, panicking with a clear message on miss
// =========================================================================

/// Find a collection by name. Panics if not found.
pub fn find_collection<'a>(collections: &'a Collections, name: &str) -> &'a Collection {
    collections.get(name).unwrap_or_else(|| {
        let names: Vec<&str> = collections.keys().map(String::as_str).collect();
        panic!("collection '{name}' not found. Available: {names:?}")
    })
}

/// Find a generated page by its output path. Panics if not found.
pub fn find_page<'a>(pages: &'a [GeneratedPage], output: &str) -> &'a GeneratedPage {
    pages
        .iter()
        .find(|p| p.output == Path::new(output))
        .unwrap_or_else(|| {
            let outputs: Vec<_> = pages.iter().map(|p| p.output.display().to_string()).collect();
            panic!("page '{output}' not found. Available: {outputs:?}")
        })
}

/// Read a file from the fixture's `dist/`. Panics if it was not written.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join("dist").join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read output {}: {e}", path.display()))
}
