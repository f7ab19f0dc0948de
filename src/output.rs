//! CLI output formatting for build results.
//!
//! Output is information-centric: each page is shown by its source name with
//! its output path as context, grouped by what it was built from.
//!
//! ```text
//! Pages
//! 001 about → about.html
//! 002 info → film/info.html
//! 003 index → index.html
//!
//! Film
//! 001 2023 → film/2023.html
//! 002 root → film/root.html
//!     Index → film/index.html
//!
//! Stylesheet → static/css/main.css
//! Assets: 12 files (5 recompressed, 1 kept original, 6 copied)
//! Generated 3 pages, 2 galleries → dist
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::types::{AssetReport, BuildReport, GeneratedPage, PageKind};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn page_line(index: usize, page: &GeneratedPage) -> String {
    format!(
        "{} {} \u{2192} {}",
        format_index(index),
        page.source,
        page.output.display()
    )
}

fn asset_line(assets: &AssetReport) -> String {
    format!(
        "Assets: {} files ({} recompressed, {} kept original, {} copied)",
        assets.total(),
        assets.recompressed,
        assets.kept_original,
        assets.copied
    )
}

pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    let content: Vec<_> = report
        .pages
        .iter()
        .filter(|p| p.kind == PageKind::Content)
        .collect();
    if !content.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in content.iter().enumerate() {
            lines.push(page_line(i + 1, page));
        }
        lines.push(String::new());
    }

    let mut galleries = 0;
    let film: Vec<_> = report
        .pages
        .iter()
        .filter(|p| p.kind != PageKind::Content)
        .collect();
    if !film.is_empty() {
        lines.push("Film".to_string());
        for page in film {
            if page.kind == PageKind::FilmIndex {
                lines.push(format!(
                    "{}Index \u{2192} {}",
                    indent(1),
                    page.output.display()
                ));
            } else {
                galleries += 1;
                lines.push(page_line(galleries, page));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Stylesheet \u{2192} {}",
        report.stylesheet.display()
    ));
    lines.push(asset_line(&report.assets));
    lines.push(format!(
        "Generated {} pages, {} galleries \u{2192} {}",
        content.len(),
        galleries,
        report.output.display()
    ));

    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}
