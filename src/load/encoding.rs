//! Text decoding for delimited inputs.
//!
//! Gapminder-style exports are usually UTF-8, but hand-edited code tables
//! often come back from spreadsheet tools as UTF-16 or Windows-1252.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::path::Path;

const DETECTION_SAMPLE_SIZE: usize = 8192;

/// Read a file and decode it to a `String`.
///
/// Returns the decoded text and the label of the encoding used.
pub fn read_text(path: &Path) -> Result<(String, &'static str)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes.
///
/// Order: BOM, strict UTF-8, then chardetng's guess decoded with replacement.
pub fn decode_bytes(bytes: &[u8]) -> (String, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (decoded.into_owned(), bom_label(encoding));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8");
    }

    let sample = &bytes[..bytes.len().min(DETECTION_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    let encoding = detector.guess(None, true);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!("Replaced undecodable bytes while reading as {}", used.name());
    }
    (decoded.into_owned(), used.name())
}

fn bom_label(encoding: &'static Encoding) -> &'static str {
    if encoding == UTF_8 {
        "utf-8-sig"
    } else if encoding == UTF_16LE {
        "utf-16-le"
    } else if encoding == UTF_16BE {
        "utf-16-be"
    } else {
        encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_fast_path() {
        let (text, enc) = decode_bytes("country,1995\ncôte d'ivoire,1\n".as_bytes());
        assert_eq!(enc, "utf-8");
        assert!(text.contains("côte"));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"country");
        let (text, enc) = decode_bytes(&bytes);
        assert_eq!(enc, "utf-8-sig");
        assert_eq!(text, "country");
    }

    #[test]
    fn utf16_le_bom() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "chad".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, enc) = decode_bytes(&bytes);
        assert_eq!(enc, "utf-16-le");
        assert_eq!(text, "chad");
    }

    #[test]
    fn latin1_falls_back_to_detection() {
        // "curaçao" in Windows-1252
        let bytes = b"country\ncura\xe7ao\nr\xe9union\n";
        let (text, enc) = decode_bytes(bytes);
        assert_ne!(enc, "utf-8");
        assert!(text.starts_with("country\ncura"));
        assert!(!text.contains('\u{FFFD}'));
    }
}
