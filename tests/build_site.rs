//! End-to-end build of the fixture site with the real image backend.
//!
//! Run with: cargo test --test build_site

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use nestgen::config::{SiteConfig, parse_config};
use nestgen::pipeline::{BuildError, build};
use nestgen::types::PageKind;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        let n = x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ (x * y);
        Rgb([(n % 256) as u8, ((n >> 2) % 256) as u8, ((x ^ y) % 256) as u8])
    });
    let mut out = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, 100))
        .unwrap();
    fs::write(path, out).unwrap();
}

/// The fixture site with a root collection and a `commissions` collection.
fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir(
        &Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site"),
        tmp.path(),
    );
    let film = tmp.path().join("src/static/img/film");
    for rel in ["1a.jpg", "1b.jpg", "2a.jpg", "2b.jpg", "commissions/1.jpg"] {
        write_jpeg(&film.join(rel), 160, 120);
    }
    tmp
}

fn read(root: &Path, rel: &str) -> String {
    let path = root.join("dist").join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

#[test]
fn film_index_is_a_copy_of_the_root_collection() {
    let tmp = site();
    let report = build(tmp.path(), &SiteConfig::default()).unwrap();

    assert_eq!(read(tmp.path(), "film/root.html"), read(tmp.path(), "film/index.html"));
    assert!(tmp.path().join("dist/film/commissions.html").is_file());

    let mut galleries: Vec<&str> = report
        .pages
        .iter()
        .filter(|p| p.kind == PageKind::Collection)
        .map(|p| p.source.as_str())
        .collect();
    galleries.sort();
    assert_eq!(galleries, vec!["commissions", "root"]);
}

#[test]
fn root_collection_pairs_every_image() {
    let tmp = site();
    build(tmp.path(), &SiteConfig::default()).unwrap();

    let root = read(tmp.path(), "film/root.html");
    assert_eq!(root.matches("gallery__img--primary").count(), 2);
    assert_eq!(root.matches("gallery__img--hover").count(), 2);
    for name in ["1a", "1b", "2a", "2b"] {
        assert!(
            root.contains(&format!("/static/img/film/{name}.jpg")),
            "{name} missing from root gallery"
        );
    }
}

#[test]
fn content_pages_and_stylesheet_are_written() {
    let tmp = site();
    build(tmp.path(), &SiteConfig::default()).unwrap();

    for rel in ["index.html", "about.html", "film/info.html", "projects/nest.html"] {
        assert!(tmp.path().join("dist").join(rel).is_file(), "{rel} missing");
    }
    assert!(!tmp.path().join("dist/notes.html").exists());

    let css = read(tmp.path(), "static/css/main.css");
    assert!(css.contains(".horizontal-gallery"));
    assert!(css.contains("#1d1d1b"));
}

#[test]
fn every_static_file_is_mirrored_and_no_image_grows() {
    let tmp = site();
    let report = build(tmp.path(), &SiteConfig::default()).unwrap();

    let src = tmp.path().join("src/static");
    let dest = tmp.path().join("dist/static");
    let mut files = 0;
    for entry in walkdir::WalkDir::new(&src) {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        files += 1;
        let rel = entry.path().strip_prefix(&src).unwrap();
        let out = dest.join(rel);
        assert!(out.is_file(), "{} not mirrored", rel.display());
        if rel.extension().is_some_and(|e| e == "jpg") {
            assert!(fs::metadata(&out).unwrap().len() <= entry.metadata().unwrap().len());
        }
    }
    assert_eq!(report.assets.total(), files);
    assert!(report.assets.recompressed > 0);
}

#[test]
fn site_toml_overrides_defaults() {
    let tmp = site();
    fs::write(
        tmp.path().join("site.toml"),
        "site_name = \"Nest\"\n\n[paths]\noutput = \"public\"\n\n[build]\nminify = false\n",
    )
    .unwrap();
    let config = nestgen::config::load_config(tmp.path()).unwrap();

    build(tmp.path(), &config).unwrap();

    let about = fs::read_to_string(tmp.path().join("public/about.html")).unwrap();
    assert!(about.contains("<title>Nest - about</title>"));
    assert!(about.contains("\n"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn missing_template_fails_the_build() {
    let tmp = site();
    fs::remove_file(tmp.path().join("src/templates/header-film.html")).unwrap();

    let err = build(tmp.path(), &SiteConfig::default()).unwrap_err();

    assert!(matches!(err, BuildError::Pages(_)));
    assert!(err.to_string().contains("header-film.html"));
}

#[test]
fn unknown_config_key_is_rejected() {
    assert!(parse_config("[film]\nnot_a_key = 1\n").is_err());
}
