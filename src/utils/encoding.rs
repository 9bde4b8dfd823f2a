//! Chapter file reading with encoding detection.
//!
//! Scraped chapters arrive in whatever encoding the source site used. Reading
//! goes BOM → strict UTF-8 → `chardetng` guess → lossy UTF-8, so a chapter is
//! always readable and never silently truncated.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Guess an encoding label from a byte sample; empty samples are "utf-8".
fn detect_from_bytes(sample: &[u8]) -> String {
    if sample.is_empty() {
        return "utf-8".to_string();
    }
    if sample.starts_with(&[0xef, 0xbb, 0xbf]) {
        return "utf-8-sig".to_string();
    }
    if sample.starts_with(&[0xff, 0xfe]) {
        return "utf-16-le".to_string();
    }
    if sample.starts_with(&[0xfe, 0xff]) {
        return "utf-16-be".to_string();
    }
    if std::str::from_utf8(sample).is_ok() {
        return "utf-8".to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let name = detector.guess(None, true).name().to_lowercase();
    if name.contains("utf-8") || name == "ascii" {
        "utf-8".to_string()
    } else {
        name
    }
}

/// Null bytes or fewer than 70% printable ASCII in the sample mean binary.
pub fn is_binary_file(path: &Path, sample_size: usize) -> bool {
    is_binary_file_impl(path, sample_size).unwrap_or(true)
}

fn is_binary_file_impl(path: &Path, sample_size: usize) -> Result<bool> {
    let mut file = File::open(path)?;
    let mut sample = vec![0u8; sample_size];
    let bytes_read = file.read(&mut sample)?;
    sample.truncate(bytes_read);

    if sample.is_empty() {
        return Ok(false);
    }
    // UTF-16 text is full of null bytes.
    if sample.starts_with(&[0xff, 0xfe]) || sample.starts_with(&[0xfe, 0xff]) {
        return Ok(false);
    }
    if sample.contains(&0) {
        return Ok(true);
    }
    // Multi-byte UTF-8 (CJK chapters) is text even though it is not ASCII.
    if std::str::from_utf8(&sample).is_ok() {
        return Ok(false);
    }

    let printable_count = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b == 9 || b == 10 || b == 13)
        .count();

    Ok((printable_count as f64 / sample.len() as f64) < 0.70)
}

/// Read a chapter file and return `(content, encoding_used)`.
///
/// A leading byte order mark is removed from the content.
pub fn read_file_safe(path: &Path) -> Result<(String, String)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

fn decode_bytes(bytes: &[u8]) -> (String, String) {
    if let Some(rest) = bytes.strip_prefix(&[0xef, 0xbb, 0xbf]) {
        let (cow, _) = UTF_8.decode_without_bom_handling(rest);
        return (cow.into_owned(), "utf-8-sig".to_string());
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        let (cow, _, _) = UTF_16LE.decode(bytes);
        return (cow.into_owned(), "utf-16-le".to_string());
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        let (cow, _, _) = UTF_16BE.decode(bytes);
        return (cow.into_owned(), "utf-16-be".to_string());
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let detected = detect_from_bytes(sample);
    if let Some(encoding) = Encoding::for_label(detected.as_bytes()) {
        let (cow, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::debug!("Replacement characters inserted while decoding as {}", used.name());
        }
        return (cow.into_owned(), used.name().to_lowercase());
    }

    let (cow, _, _) = UTF_8.decode(bytes);
    (cow.into_owned(), "utf-8".to_string())
}
