//! Primary/hover image pairing.
//!
//! Gallery images can come in pairs: `3a-dock.jpg` is shown, and `3b-dock.jpg`
//! is revealed when the visitor hovers (or touches) the image. Pairs are formed
//! purely from filenames via [`naming::parse_pair_marker`](crate::naming::parse_pair_marker):
//!
//! | Filenames | Pairs |
//! |---|---|
//! | `1a.jpg`, `1b.jpg` | `1a.jpg` + hover `1b.jpg` |
//! | `2a.jpg` | `2a.jpg` |
//! | `3b.jpg` | `3b.jpg` (a lone `b` is shown as a normal image) |
//! | `beach.jpg` | `beach.jpg` |
//!
//! Pairs keep the order in which their key first appears in the input, so a
//! naturally sorted collection yields naturally sorted pairs.

use crate::naming::{PairSlot, parse_pair_marker};
use serde::Serialize;
use std::collections::HashMap;

/// A gallery entry: an image and the optional image revealed on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePair {
    pub primary: String,
    pub hover: Option<String>,
}

#[derive(Default)]
struct Bucket {
    primary: Option<String>,
    hover: Option<String>,
}

/// Group a collection's filenames into pairs.
///
/// Two files claiming the same slot of the same key (e.g. `4a.jpg` and
/// `4a-alt.jpg`) cannot both be shown: the later one wins and a warning is
/// logged.
pub fn pair_images(images: &[String]) -> Vec<ImagePair> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Bucket> = HashMap::new();

    for image in images {
        let (key, slot) =
            parse_pair_marker(image).unwrap_or((image.as_str(), PairSlot::Primary));

        let bucket = buckets.entry(key).or_insert_with(|| {
            order.push(key);
            Bucket::default()
        });
        let target = match slot {
            PairSlot::Primary => &mut bucket.primary,
            PairSlot::Hover => &mut bucket.hover,
        };
        if let Some(previous) = target.replace(image.clone()) {
            log::warn!("Image '{image}' replaces '{previous}' in pair '{key}'");
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let bucket = buckets.remove(key)?;
            match (bucket.primary, bucket.hover) {
                (Some(primary), hover) => Some(ImagePair { primary, hover }),
                (None, Some(hover)) => Some(ImagePair {
                    primary: hover,
                    hover: None,
                }),
                (None, None) => None,
            }
        })
        .collect()
}
