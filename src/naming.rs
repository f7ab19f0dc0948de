//! Centralized filename conventions.
//!
//! Every name-derived value in the site comes from here:
//!
//! - **Content pages**: `about-content.html` → page name `about`
//! - **Natural ordering**: `2.jpg` sorts before `10.jpg`, case-insensitively
//! - **Pair markers**: `3a-street.jpg` / `3b-street.jpg` share the pair key `3`
//! - **Alt text**: `3a-street.jpg` → `3a-street`
//! - **Page titles**: `index` → site name, anything else → `site name - page`

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Filename suffix that marks a renderable content fragment.
pub const CONTENT_SUFFIX: &str = "-content.html";

/// Page name that renders with the bare site name as its title.
pub const INDEX_PAGE: &str = "index";

/// Extract the logical page name from a content filename.
///
/// - `"about-content.html"` → `Some("about")`
/// - `"about.html"` → `None`
/// - `"-content.html"` → `None` (no name left)
pub fn content_page_name(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(CONTENT_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Compute a page title from the site name and page name.
pub fn page_title(site_name: &str, page_name: &str) -> String {
    if page_name == INDEX_PAGE {
        site_name.to_string()
    } else {
        format!("{site_name} - {page_name}")
    }
}

/// Which slot of a pair a filename fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSlot {
    /// `a` marker: the image shown by default.
    Primary,
    /// `b` marker: the image revealed on hover.
    Hover,
}

/// Parse the `<digits><a|b>` prefix of an image filename.
///
/// Returns the digit run (the pair key) and the slot the marker selects.
///
/// - `"12a-dock.jpg"` → `Some(("12", Primary))`
/// - `"12b.jpg"` → `Some(("12", Hover))`
/// - `"12.jpg"` → `None`
/// - `"a12.jpg"` → `None`
pub fn parse_pair_marker(filename: &str) -> Option<(&str, PairSlot)> {
    let digits_end = filename
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(filename.len());
    if digits_end == 0 {
        return None;
    }
    let slot = match filename[digits_end..].chars().next()? {
        'a' => PairSlot::Primary,
        'b' => PairSlot::Hover,
        _ => return None,
    };
    Some((&filename[..digits_end], slot))
}

/// Alt text for an image: the filename with a trailing jpg/jpeg/png extension removed.
///
/// Other extensions are left in place.
pub fn alt_text(filename: &str) -> &str {
    if let Some((stem, ext)) = filename.rsplit_once('.')
        && ["jpg", "jpeg", "png"]
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    {
        return stem;
    }
    filename
}

/// Natural filename ordering.
///
/// Digit runs compare by numeric value, everything else compares
/// case-insensitively. Names that compare equal under those rules (`A.jpg` and
/// `a.jpg`, `01.jpg` and `1.jpg`) fall back to plain byte order so the result
/// is total and stable.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key_cmp(a, b).then_with(|| a.cmp(b))
}

fn natural_key_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&l), Some(&r)) => (l, r),
        };

        let ord = if l.is_ascii_digit() && r.is_ascii_digit() {
            let l_run = take_digit_run(&mut left);
            let r_run = take_digit_run(&mut right);
            cmp_digit_runs(&l_run, &r_run)
        } else {
            left.next();
            right.next();
            l.to_lowercase().cmp(r.to_lowercase())
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Compare two digit runs by value without parsing (runs may exceed u64).
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
