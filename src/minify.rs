//! HTML minification for generated pages.
//!
//! Pages are assembled from hand-written fragments full of indentation and
//! comments; minification strips those before a page is written. It is on by
//! default and controlled by `build.minify`.

use crate::config::BuildConfig;
use std::borrow::Cow;

/// Minify a page if enabled, returning the bytes to write.
pub fn minify_page<'a>(html: &'a str, config: &BuildConfig) -> Cow<'a, [u8]> {
    if config.minify {
        Cow::Owned(minify_html::minify(html.as_bytes(), &minify_config()))
    } else {
        Cow::Borrowed(html.as_bytes())
    }
}

fn minify_config() -> minify_html::Cfg {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg
}
