//! Gallery markup for collection pages.
//!
//! A collection page's content is a horizontally scrolling strip with one item
//! per [`ImagePair`]:
//!
//! ```html
//! <section class="horizontal-gallery">
//!   <div class="horizontal-scroll-container">
//!     <div class="horizontal-gallery-item has-hover">
//!       <img class="gallery__img gallery__img--primary" src="…/1a.jpg" alt="1a" loading="lazy">
//!       <img class="gallery__img gallery__img--hover" src="…/1b.jpg" alt="1b" loading="lazy">
//!     </div>
//!   </div>
//! </section>
//! ```
//!
//! The hover image sits on top of the primary one and is revealed by CSS. Touch
//! devices get the same effect from `static/gallery-hover.js`, which is emitted
//! once per page and only when some pair has a hover image.

use crate::naming::alt_text;
use crate::pairing::ImagePair;
use crate::scan::Collection;
use maud::{Markup, PreEscaped, html};

const HOVER_JS: &str = include_str!("../static/gallery-hover.js");

/// Render the gallery content block for a collection.
pub fn render_gallery(collection: &Collection, pairs: &[ImagePair], url_prefix: &str) -> Markup {
    let has_hover = pairs.iter().any(|p| p.hover.is_some());

    html! {
        section.horizontal-gallery {
            div.horizontal-scroll-container {
                @for pair in pairs {
                    div.horizontal-gallery-item.has-hover[pair.hover.is_some()] {
                        (gallery_image(collection, &pair.primary, url_prefix, "gallery__img--primary"))
                        @if let Some(hover) = &pair.hover {
                            (gallery_image(collection, hover, url_prefix, "gallery__img--hover"))
                        }
                    }
                }
            }
        }
        @if has_hover {
            script { (PreEscaped(HOVER_JS)) }
        }
    }
}

fn gallery_image(collection: &Collection, filename: &str, url_prefix: &str, role: &str) -> Markup {
    html! {
        img class={ "gallery__img " (role) }
            src=(collection.image_url(url_prefix, filename))
            alt=(alt_text(filename))
            loading="lazy";
    }
}
