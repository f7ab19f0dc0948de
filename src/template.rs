//! Base template assembly.
//!
//! Every page on the site is the same HTML skeleton with four holes:
//!
//! ```html
//! <title>{{PAGE_TITLE}}</title>
//! ...
//! <div id="header-container"></div>
//! <div id="content-container"></div>
//! <div id="footer-container"></div>
//! ```
//!
//! The skeleton is parsed once into a [`Template`]: a list of literal text
//! segments and named [`Slot`]s. Rendering resolves each slot by name from
//! [`Fragments`], so the order of markers in the skeleton is irrelevant and
//! fragment text is never rescanned for markers.
//!
//! Parsing is strict. A skeleton without one of the markers is rejected instead
//! of silently producing a page with a hole in it; container markers must appear
//! exactly once, the title token may appear any number of times (e.g. in
//! `<title>` and an `og:title` meta tag).
//!
//! Fragments are inserted verbatim: they are trusted, pre-rendered HTML.

use std::fmt;
use thiserror::Error;

pub const TITLE_TOKEN: &str = "{{PAGE_TITLE}}";
pub const HEADER_MARKER: &str = r#"<div id="header-container"></div>"#;
pub const CONTENT_MARKER: &str = r#"<div id="content-container"></div>"#;
pub const FOOTER_MARKER: &str = r#"<div id="footer-container"></div>"#;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template has no {slot} slot (expected `{marker}`)")]
    MissingSlot { slot: Slot, marker: &'static str },
    #[error("Template has {count} {slot} slots, exactly one is allowed")]
    DuplicateSlot { slot: Slot, count: usize },
}

/// A named hole in the base template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Title,
    Header,
    Content,
    Footer,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Title, Slot::Header, Slot::Content, Slot::Footer];

    /// The literal text that marks this slot in the skeleton.
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Title => TITLE_TOKEN,
            Slot::Header => HEADER_MARKER,
            Slot::Content => CONTENT_MARKER,
            Slot::Footer => FOOTER_MARKER,
        }
    }

    fn repeatable(self) -> bool {
        matches!(self, Slot::Title)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Title => "title",
            Slot::Header => "header",
            Slot::Content => "content",
            Slot::Footer => "footer",
        };
        f.write_str(name)
    }
}

/// Values for every slot of one page.
#[derive(Debug, Clone, Copy)]
pub struct Fragments<'a> {
    pub title: &'a str,
    pub header: &'a str,
    pub content: &'a str,
    pub footer: &'a str,
}

impl<'a> Fragments<'a> {
    fn get(&self, slot: Slot) -> &'a str {
        match slot {
            Slot::Title => self.title,
            Slot::Header => self.header,
            Slot::Content => self.content,
            Slot::Footer => self.footer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a skeleton, checking that every slot is present.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some((offset, slot)) = next_marker(rest) {
            if offset > 0 {
                segments.push(Segment::Text(rest[..offset].to_string()));
            }
            segments.push(Segment::Slot(slot));
            rest = &rest[offset + slot.marker().len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        let template = Self { segments };
        for slot in Slot::ALL {
            match template.slot_count(slot) {
                0 => {
                    return Err(TemplateError::MissingSlot {
                        slot,
                        marker: slot.marker(),
                    });
                }
                1 => {}
                count if !slot.repeatable() => {
                    return Err(TemplateError::DuplicateSlot { slot, count });
                }
                _ => {}
            }
        }
        Ok(template)
    }

    /// Fill every slot and return the finished page.
    pub fn render(&self, fragments: &Fragments<'_>) -> String {
        let mut page = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => page.push_str(text),
                Segment::Slot(slot) => page.push_str(fragments.get(*slot)),
            }
        }
        page
    }

    fn slot_count(&self, slot: Slot) -> usize {
        self.segments
            .iter()
            .filter(|s| **s == Segment::Slot(slot))
            .count()
    }
}

/// Earliest marker in `text`, with its byte offset.
fn next_marker(text: &str) -> Option<(usize, Slot)> {
    Slot::ALL
        .iter()
        .filter_map(|&slot| text.find(slot.marker()).map(|offset| (offset, slot)))
        .min_by_key(|(offset, _)| *offset)
}
