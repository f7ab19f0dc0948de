//! # nestgen
//!
//! Static site generator for The Nest, a small portfolio site with a film
//! photography sub-site. Pages are stitched together from hand-written HTML
//! fragments; film galleries are generated from the image directory tree.
//!
//! # Architecture: Three-Phase Build
//!
//! ```text
//! 1. Pages       templates + content/ + img/film/  →  dist/**/*.html
//! 2. Stylesheet  sass/main.scss                    →  dist/static/css/main.css
//! 3. Assets      static/                           →  dist/static/ (images recompressed)
//! ```
//!
//! Nothing is cached between builds: every run rediscovers its inputs and
//! overwrites the output tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Runs the phases in order and aggregates their errors |
//! | [`pages`] | Phase 1: content pages and film collection galleries |
//! | [`template`] | Base template parsed into literal text and named slots |
//! | [`discover`] | Finds `-content.html` fragments under the content root |
//! | [`scan`] | Groups film images into collections by directory |
//! | [`pairing`] | Groups a collection's images into primary/hover pairs |
//! | [`gallery`] | Renders a collection's pairs as gallery markup (Maud) |
//! | [`header`] | Active-link highlighting for the film header |
//! | [`naming`] | Filename conventions: suffixes, pair markers, natural order |
//! | [`minify`] | Optional HTML minification of written pages |
//! | [`stylesheet`] | Phase 2: Sass compilation via `grass` |
//! | [`assets`] | Phase 3: mirrors the static tree, recompressing images in parallel |
//! | [`imaging`] | Pure-Rust JPEG/PNG recompression behind a backend trait |
//! | [`config`] | `site.toml` loading, defaults and validation |
//! | [`types`] | Build results shared with [`output`] |
//! | [`output`] | CLI output formatting for the build report |
//!
//! # Design Decisions
//!
//! ## Fragments Are Trusted HTML
//!
//! Header, footer and content fragments are written by the site owner and are
//! inserted verbatim. Only generated markup (gallery items, header decorations)
//! goes through Maud, where filenames are escaped.
//!
//! ## Awaited Asset Jobs
//!
//! Image recompression is the slow part of a build. Jobs are planned up front,
//! run on rayon's pool, and collected before the build reports success, so a
//! finished build always has a finished output tree.
//!
//! ## Explicit Configuration
//!
//! Every location and site name lives in [`config::SiteConfig`] and is passed
//! into the builders. A project without `site.toml` builds with the stock
//! layout.

pub mod assets;
pub mod config;
pub mod discover;
pub mod gallery;
pub mod header;
pub mod imaging;
pub mod minify;
pub mod naming;
pub mod output;
pub mod pages;
pub mod pairing;
pub mod pipeline;
pub mod scan;
pub mod stylesheet;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
