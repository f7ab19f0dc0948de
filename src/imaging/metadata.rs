//! Carries colour and orientation metadata from a source file into its
//! re-encoded bytes.
//!
//! Decoding to pixels loses everything but the pixels. Browsers rely on two
//! pieces of that metadata to show a photo correctly: the EXIF orientation
//! tag and the ICC colour profile. Both are copied over verbatim at the
//! container level, without touching the pixel data:
//!
//! | Format | Copied | Inserted |
//! |---|---|---|
//! | JPEG | APP1 `Exif`, APP2 `ICC_PROFILE` segments | after SOI (and JFIF APP0 if present) |
//! | PNG | `iCCP`, `sRGB`, `gAMA`, `cHRM`, `eXIf` chunks | after IHDR |
//!
//! Malformed input is never an error: whatever can be found is carried, and a
//! file that cannot be walked contributes nothing.

use super::params::RecompressFormat;

/// Copy metadata from `source` into `encoded`, both complete files of `format`.
pub fn carry_metadata(source: &[u8], encoded: Vec<u8>, format: RecompressFormat) -> Vec<u8> {
    match format {
        RecompressFormat::Jpeg => carry_jpeg(source, encoded),
        RecompressFormat::Png => carry_png(source, encoded),
    }
}

// ---------------------------------------------------------------------------
// JPEG
// ---------------------------------------------------------------------------

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const ICC_HEADER: &[u8] = b"ICC_PROFILE\0";

/// A marker segment: marker byte and the full segment bytes including `FF xx`.
struct Segment<'a> {
    marker: u8,
    bytes: &'a [u8],
}

impl Segment<'_> {
    fn payload(&self) -> &[u8] {
        self.bytes.get(4..).unwrap_or_default()
    }
}

/// Header segments up to (not including) the start of scan.
fn jpeg_segments(data: &[u8]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    if !data.starts_with(&[0xFF, 0xD8]) {
        return segments;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() && data[pos] == 0xFF {
        let marker = data[pos + 1];
        // SOS: entropy-coded data follows
        if marker == 0xDA {
            break;
        }
        let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let end = pos + 2 + len;
        if len < 2 || end > data.len() {
            break;
        }
        segments.push(Segment {
            marker,
            bytes: &data[pos..end],
        });
        pos = end;
    }
    segments
}

fn is_carried_jpeg_segment(segment: &Segment) -> bool {
    (segment.marker == 0xE1 && segment.payload().starts_with(EXIF_HEADER))
        || (segment.marker == 0xE2 && segment.payload().starts_with(ICC_HEADER))
}

fn carry_jpeg(source: &[u8], encoded: Vec<u8>) -> Vec<u8> {
    let carried: Vec<&[u8]> = jpeg_segments(source)
        .iter()
        .filter(|s| is_carried_jpeg_segment(s))
        .map(|s| s.bytes)
        .collect();
    if carried.is_empty() {
        return encoded;
    }

    let existing = jpeg_segments(&encoded);
    if existing.iter().any(is_carried_jpeg_segment) {
        return encoded;
    }

    // JFIF APP0 must stay first when the encoder wrote one
    let insert_at = match existing.first() {
        Some(first) if first.marker == 0xE0 => Some(2 + first.bytes.len()),
        _ if encoded.starts_with(&[0xFF, 0xD8]) => Some(2),
        _ => None,
    };

    match insert_at {
        Some(at) => splice(encoded, at, &carried),
        None => encoded,
    }
}

// ---------------------------------------------------------------------------
// PNG
// ---------------------------------------------------------------------------

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const CARRIED_CHUNKS: &[&[u8; 4]] = &[b"iCCP", b"sRGB", b"gAMA", b"cHRM", b"eXIf"];

/// A chunk: its type and the full chunk bytes including length and CRC.
struct Chunk<'a> {
    kind: [u8; 4],
    bytes: &'a [u8],
}

fn png_chunks(data: &[u8]) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    if !data.starts_with(PNG_SIGNATURE) {
        return chunks;
    }

    let mut pos = PNG_SIGNATURE.len();
    while pos + 12 <= data.len() {
        let len = u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
        let end = pos + 12 + len as usize;
        if end > data.len() {
            break;
        }
        let kind = [data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]];
        chunks.push(Chunk {
            kind,
            bytes: &data[pos..end],
        });
        if &kind == b"IEND" {
            break;
        }
        pos = end;
    }
    chunks
}

fn carry_png(source: &[u8], encoded: Vec<u8>) -> Vec<u8> {
    let existing = png_chunks(&encoded);
    let Some(ihdr) = existing.first().filter(|c| &c.kind == b"IHDR") else {
        return encoded;
    };

    let carried: Vec<&[u8]> = png_chunks(source)
        .iter()
        .filter(|c| CARRIED_CHUNKS.contains(&&c.kind))
        .filter(|c| !existing.iter().any(|e| e.kind == c.kind))
        .map(|c| c.bytes)
        .collect();
    if carried.is_empty() {
        return encoded;
    }

    let insert_at = PNG_SIGNATURE.len() + ihdr.bytes.len();
    splice(encoded, insert_at, &carried)
}

fn splice(encoded: Vec<u8>, at: usize, parts: &[&[u8]]) -> Vec<u8> {
    let extra: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(encoded.len() + extra);
    out.extend_from_slice(&encoded[..at]);
    for part in parts {
        out.extend_from_slice(part);
    }
    out.extend_from_slice(&encoded[at..]);
    out
}
