//! Static asset mirroring with image recompression.
//!
//! The static source tree is copied into the output tree file by file. JPEG and
//! PNG files are recompressed on the way through; everything else is copied
//! byte-for-byte.
//!
//! ## Execution
//!
//! Mirroring runs in two steps:
//!
//! 1. **Plan**: walk the source tree, create every output directory and
//!    build one [`AssetJob`] per file. Symlinks are followed, so a linked
//!    file is mirrored as a regular file and a link loop fails the walk.
//! 2. **Run**: execute the jobs on rayon's pool and collect every result.
//!
//! [`mirror_assets`] returns only after every job has finished, so callers can
//! rely on the output tree being complete. The first failed job fails the whole
//! mirror.
//!
//! ## Recompression outcomes
//!
//! | Backend result | File written |
//! |---|---|
//! | Smaller than source | recompressed bytes |
//! | Same size or larger | original bytes |
//! | Decode failure | original bytes, with a warning |
//! | Any other error | none, mirror fails |

use crate::imaging::{BackendError, ImageBackend, Quality, RecompressFormat, RecompressParams};
use crate::types::AssetReport;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk static directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Static directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("Failed to recompress {path}: {source}")]
    Recompress {
        path: PathBuf,
        source: BackendError,
    },
}

/// How the mirror treats images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Route JPEG and PNG files through the backend.
    pub recompress: bool,
    pub quality: Quality,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            recompress: true,
            quality: Quality::default(),
        }
    }
}

/// One file to mirror.
#[derive(Debug, Clone, PartialEq)]
struct AssetJob {
    source: PathBuf,
    dest: PathBuf,
    /// Set when the file is an image to recompress.
    format: Option<RecompressFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobOutcome {
    Copied,
    Recompressed,
    KeptOriginal,
}

/// Mirror `source` into `dest`, recompressing images with `backend`.
pub fn mirror_assets(
    source: &Path,
    dest: &Path,
    backend: &dyn ImageBackend,
    options: &MirrorOptions,
) -> Result<AssetReport, AssetError> {
    let jobs = plan_jobs(source, dest, options)?;
    log::debug!("Mirroring {} files from {}", jobs.len(), source.display());

    let outcomes = jobs
        .par_iter()
        .map(|job| run_job(job, backend, options.quality))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = AssetReport::default();
    for outcome in outcomes {
        match outcome {
            JobOutcome::Copied => report.copied += 1,
            JobOutcome::Recompressed => report.recompressed += 1,
            JobOutcome::KeptOriginal => report.kept_original += 1,
        }
    }
    Ok(report)
}

/// Walk the source tree, creating output directories as they are found.
fn plan_jobs(
    source: &Path,
    dest: &Path,
    options: &MirrorOptions,
) -> Result<Vec<AssetJob>, AssetError> {
    if !source.is_dir() {
        return Err(AssetError::MissingSource(source.to_path_buf()));
    }

    let mut jobs = Vec::new();
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            let format = if options.recompress {
                RecompressFormat::from_path(entry.path())
            } else {
                None
            };
            jobs.push(AssetJob {
                source: entry.path().to_path_buf(),
                dest: target,
                format,
            });
        }
    }
    Ok(jobs)
}

fn run_job(
    job: &AssetJob,
    backend: &dyn ImageBackend,
    quality: Quality,
) -> Result<JobOutcome, AssetError> {
    let Some(format) = job.format else {
        std::fs::copy(&job.source, &job.dest)?;
        return Ok(JobOutcome::Copied);
    };

    let params = RecompressParams {
        source: job.source.clone(),
        format,
        quality,
    };
    match backend.recompress(&params) {
        Ok(bytes) => {
            let original_len = std::fs::metadata(&job.source)?.len();
            if (bytes.len() as u64) < original_len {
                std::fs::write(&job.dest, bytes)?;
                Ok(JobOutcome::Recompressed)
            } else {
                std::fs::copy(&job.source, &job.dest)?;
                Ok(JobOutcome::KeptOriginal)
            }
        }
        Err(BackendError::Decode(reason)) => {
            log::warn!("Copying {} unchanged: {}", job.source.display(), reason);
            std::fs::copy(&job.source, &job.dest)?;
            Ok(JobOutcome::KeptOriginal)
        }
        Err(source) => Err(AssetError::Recompress {
            path: job.source.clone(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{
        EXIF_ORIENTATION_6, add_exif_segment, create_test_jpeg, create_test_png,
    };
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// static/ with one of each kind of file, images filled with `image_bytes`.
    fn static_tree(image_bytes: &[u8]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        write(&src.join("img/film/root/1a.jpg"), image_bytes);
        write(&src.join("img/logo.png"), image_bytes);
        write(&src.join("img/loop.gif"), b"GIF89a");
        write(&src.join("sass/main.scss"), b"body { margin: 0; }");
        write(&src.join("fonts/nest.woff2"), b"wOF2");
        tmp
    }

    #[test]
    fn every_source_file_exists_in_output() {
        let tmp = static_tree(b"large original image bytes");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");
        let backend = MockBackend::returning(b"tiny");

        let report = mirror_assets(&src, &dest, &backend, &MirrorOptions::default()).unwrap();

        for rel in [
            "img/film/root/1a.jpg",
            "img/logo.png",
            "img/loop.gif",
            "sass/main.scss",
            "fonts/nest.woff2",
        ] {
            assert!(dest.join(rel).is_file(), "{rel} missing from output");
        }
        assert_eq!(report.total(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_mirrored_through_the_link() {
        let tmp = TempDir::new().unwrap();
        let fonts = tmp.path().join("shared/fonts");
        write(&fonts.join("nest.woff2"), b"wOF2");
        let src = tmp.path().join("static");
        fs::create_dir_all(src.join("fonts")).unwrap();
        std::os::unix::fs::symlink(fonts.join("nest.woff2"), src.join("fonts/nest.woff2")).unwrap();
        std::os::unix::fs::symlink(&fonts, src.join("vendor")).unwrap();
        let dest = tmp.path().join("dist/static");

        let report =
            mirror_assets(&src, &dest, &MockBackend::returning(b""), &MirrorOptions::default())
                .unwrap();

        assert_eq!(fs::read(dest.join("fonts/nest.woff2")).unwrap(), b"wOF2");
        assert_eq!(fs::read(dest.join("vendor/nest.woff2")).unwrap(), b"wOF2");
        assert!(!fs::symlink_metadata(dest.join("fonts/nest.woff2")).unwrap().is_symlink());
        assert_eq!(report.copied, 2);
    }

    #[cfg(unix)]
    #[test]
    fn link_loop_fails_the_mirror() {
        let tmp = static_tree(b"bytes");
        let src = tmp.path().join("static");
        std::os::unix::fs::symlink(&src, src.join("img/again")).unwrap();

        let result = mirror_assets(
            &src,
            &tmp.path().join("dist/static"),
            &MockBackend::returning(b""),
            &MirrorOptions::default(),
        );
        assert!(matches!(result, Err(AssetError::Walk(_))));
    }

    #[test]
    fn smaller_result_replaces_image() {
        let tmp = static_tree(b"large original image bytes");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");
        let backend = MockBackend::returning(b"tiny");

        let report = mirror_assets(&src, &dest, &backend, &MirrorOptions::default()).unwrap();

        assert_eq!(fs::read(dest.join("img/film/root/1a.jpg")).unwrap(), b"tiny");
        assert_eq!(fs::read(dest.join("img/logo.png")).unwrap(), b"tiny");
        assert_eq!(report.recompressed, 2);
        assert_eq!(report.copied, 3);
    }

    #[test]
    fn larger_result_keeps_original() {
        let tmp = static_tree(b"small");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");
        let backend = MockBackend::returning(b"a much larger re-encoded image");

        let report = mirror_assets(&src, &dest, &backend, &MirrorOptions::default()).unwrap();

        assert_eq!(fs::read(dest.join("img/logo.png")).unwrap(), b"small");
        assert_eq!(report.kept_original, 2);
        assert_eq!(report.recompressed, 0);
    }

    #[test]
    fn only_jpeg_and_png_reach_backend() {
        let tmp = static_tree(b"large original image bytes");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");
        let backend = MockBackend::returning(b"tiny");
        let options = MirrorOptions {
            recompress: true,
            quality: Quality::new(60),
        };

        mirror_assets(&src, &dest, &backend, &options).unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(ops[0].source.ends_with("1a.jpg"));
        assert_eq!(ops[0].format, RecompressFormat::Jpeg);
        assert_eq!(ops[0].quality, 60);
        assert!(ops[1].source.ends_with("logo.png"));
        assert_eq!(ops[1].format, RecompressFormat::Png);
    }

    #[test]
    fn undecodable_image_is_copied_verbatim() {
        let tmp = static_tree(b"not really an image");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");

        let report =
            mirror_assets(&src, &dest, &MockBackend::failing(), &MirrorOptions::default()).unwrap();

        assert_eq!(
            fs::read(dest.join("img/film/root/1a.jpg")).unwrap(),
            b"not really an image"
        );
        assert_eq!(report.kept_original, 2);
    }

    #[test]
    fn recompression_disabled_copies_everything() {
        let tmp = static_tree(b"large original image bytes");
        let src = tmp.path().join("static");
        let dest = tmp.path().join("dist/static");
        let backend = MockBackend::returning(b"tiny");
        let options = MirrorOptions {
            recompress: false,
            ..MirrorOptions::default()
        };

        let report = mirror_assets(&src, &dest, &backend, &options).unwrap();

        assert!(backend.get_operations().is_empty());
        assert_eq!(report.copied, 5);
        assert_eq!(
            fs::read(dest.join("img/logo.png")).unwrap(),
            b"large original image bytes"
        );
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = mirror_assets(
            &tmp.path().join("nope"),
            &tmp.path().join("dist"),
            &MockBackend::returning(b""),
            &MirrorOptions::default(),
        );
        assert!(matches!(result, Err(AssetError::MissingSource(_))));
    }

    #[test]
    fn real_jpeg_output_never_larger_than_source() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        create_test_jpeg(&src.join("img/film/2023/1a.jpg"), 320, 240, 100);
        create_test_jpeg(&src.join("img/film/2023/1b.jpg"), 64, 64, 20);
        create_test_png(&src.join("img/logo.png"), 48, 48);
        let dest = tmp.path().join("dist/static");

        let report =
            mirror_assets(&src, &dest, &RustBackend::new(), &MirrorOptions::default()).unwrap();

        assert_eq!(report.total(), 3);
        for rel in ["img/film/2023/1a.jpg", "img/film/2023/1b.jpg", "img/logo.png"] {
            let before = fs::metadata(src.join(rel)).unwrap().len();
            let after = fs::metadata(dest.join(rel)).unwrap().len();
            assert!(after <= before, "{rel} grew from {before} to {after}");
            assert!(image::open(dest.join(rel)).is_ok(), "{rel} is not decodable");
        }
    }

    #[test]
    fn recompressed_photo_keeps_exif_orientation() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        let photo = src.join("img/film/2023/1a.jpg");
        create_test_jpeg(&photo, 320, 240, 100);
        fs::write(&photo, add_exif_segment(&fs::read(&photo).unwrap())).unwrap();
        let dest = tmp.path().join("dist/static");

        let report =
            mirror_assets(&src, &dest, &RustBackend::new(), &MirrorOptions::default()).unwrap();

        assert_eq!(report.recompressed, 1);
        let out = fs::read(dest.join("img/film/2023/1a.jpg")).unwrap();
        assert!(out.len() < fs::metadata(&photo).unwrap().len() as usize);
        assert!(
            out.windows(EXIF_ORIENTATION_6.len())
                .any(|w| w == EXIF_ORIENTATION_6),
            "orientation tag lost"
        );
    }
}
