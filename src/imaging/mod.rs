//! Image recompression in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **JPEG re-encode** | `JpegEncoder::new_with_quality` |
//! | **PNG re-encode** | `PngEncoder` (best compression) |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Metadata**: EXIF and colour profile carry-over into re-encoded files

pub mod backend;
mod metadata;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{Quality, RecompressFormat, RecompressParams};
pub use rust_backend::RustBackend;
