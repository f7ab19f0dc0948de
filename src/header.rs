//! Active-page highlighting for the film header.
//!
//! The film header fragment is shared by every film page, so it cannot mark the
//! current navigation link itself. Before a film page is assembled its header
//! is decorated with:
//!
//! - a `.page-active` style rule (unless the fragment already defines one), and
//! - a small script, inserted before `</header>`, that adds `page-active` to the
//!   nav links matching the current page category or collection.
//!
//! Collections are grouped into categories for this purpose: four-digit names
//! are `years`, other names are looked up in the configured category lists.

use maud::{Markup, PreEscaped, html};
use std::collections::BTreeMap;

const ACTIVE_STYLE: &str = ".page-active { text-decoration: underline; font-weight: bold; }";
const ACTIVE_NAV_JS: &str = include_str!("../static/active-nav.js");

/// Category of collections named by a four-digit year.
pub const YEARS_CATEGORY: &str = "years";

/// What the page being built is, for navigation purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivePage<'a> {
    /// Page name or collection category.
    pub page: Option<&'a str>,
    /// Collection name, for collection pages.
    pub collection: Option<&'a str>,
}

/// Category a collection belongs to, if any.
pub fn collection_category<'a>(
    name: &str,
    categories: &'a BTreeMap<String, Vec<String>>,
) -> Option<&'a str> {
    if name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()) {
        return Some(YEARS_CATEGORY);
    }
    categories
        .iter()
        .find(|(_, members)| members.iter().any(|m| m == name))
        .map(|(category, _)| category.as_str())
}

/// Decorate a header fragment for the given page.
pub fn highlight_active(header: &str, active: &ActivePage<'_>) -> String {
    let mut decorated = if header.contains("page-active") {
        header.to_string()
    } else {
        let mut with_style = style_block().into_string();
        with_style.push_str(header);
        with_style
    };

    let script = active_script(active).into_string();
    match decorated.find("</header>") {
        Some(pos) => decorated.insert_str(pos, &format!("{script}\n")),
        None => decorated.push_str(&script),
    }
    decorated
}

fn style_block() -> Markup {
    html! {
        style { (PreEscaped(ACTIVE_STYLE)) }
    }
}

fn active_script(active: &ActivePage<'_>) -> Markup {
    let body = format!(
        "(function (currentPage, currentCollection) {{\n{ACTIVE_NAV_JS}}})({}, {});",
        js_string(active.page.unwrap_or_default()),
        js_string(active.collection.unwrap_or_default()),
    );
    html! {
        script { (PreEscaped(body)) }
    }
}

/// Encode a value as a JavaScript string literal that is safe inside `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace("</", "<\\/")
}
