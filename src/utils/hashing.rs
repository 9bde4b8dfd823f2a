//! Stable hashing for segment IDs

use sha2::{Digest, Sha256};

/// 16-hex-char id for the segment at `index` of `chapter`.
///
/// Only the first 1000 characters of the text feed the hash; chapter and
/// index already make ids unique within a run.
pub fn segment_id(chapter: &str, index: usize, text: &str) -> String {
    let text_prefix: String = text.chars().take(1000).collect();
    let hash_input = format!("{chapter}:{index}:{text_prefix}");
    let mut hasher = Sha256::new();
    hasher.update(hash_input.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::segment_id;

    #[test]
    fn ids_are_stable_and_short() {
        let a = segment_id("chapter_001", 3, "Some text.");
        assert_eq!(a.len(), 16);
        assert_eq!(a, segment_id("chapter_001", 3, "Some text."));
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_depend_on_position() {
        assert_ne!(segment_id("c", 0, "x"), segment_id("c", 1, "x"));
        assert_ne!(segment_id("a", 0, "x"), segment_id("b", 0, "x"));
    }
}
