//! Binary detection and text decoding

use crate::domain::BINARY_SNIFF_BYTES;
use chardetng::EncodingDetector;
use encoding_rs::UTF_8;

const CONTROL_RATIO_LIMIT: f64 = 0.3;

/// Classify a byte buffer as binary by sampling its prefix.
///
/// Any NUL byte is binary. Otherwise control bytes (below 32 or 127, except
/// tab, newline and carriage return) are counted against printable bytes,
/// and the buffer is binary once that ratio exceeds 0.3. The ratio is only
/// evaluated after at least one printable byte has been seen.
pub fn is_binary_bytes(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];

    let mut control = 0usize;
    let mut printable = 0usize;
    for &byte in sample {
        if byte == 0 {
            return true;
        }
        if (byte < 32 && !matches!(byte, b'\t' | b'\n' | b'\r')) || byte == 127 {
            control += 1;
        } else {
            printable += 1;
        }
        if printable > 0 && control as f64 / printable as f64 > CONTROL_RATIO_LIMIT {
            return true;
        }
    }
    false
}

/// Decode file bytes as text.
///
/// Valid UTF-8 (with or without BOM) is taken as-is; anything else goes
/// through charset detection.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors && encoding != UTF_8 {
        tracing::debug!("lossy decode using {}", encoding.name());
    }
    text.into_owned()
}
