//! Paragraph-based chunking.

use super::grouping::group_sentences;
use super::paragraph::{combine_paragraphs_by_chars, split_paragraphs};
use super::sentence::SentenceSplitter;
use crate::utils::estimate_tokens;

/// Prose chunker: paragraphs are combined by characters first, and only the
/// combined groups that miss the token budget are re-packed sentence by
/// sentence.
pub struct ParagraphChunker<'a> {
    splitter: &'a dyn SentenceSplitter,
}

impl<'a> ParagraphChunker<'a> {
    pub fn new(splitter: &'a dyn SentenceSplitter) -> Self {
        Self { splitter }
    }

    pub fn chunk(
        &self,
        content: &str,
        paragraph_char_budget: usize,
        token_budget: usize,
        chars_per_token: f64,
    ) -> Vec<String> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();

        for group in combine_paragraphs_by_chars(content, paragraph_char_budget) {
            let group_tokens = estimate_tokens(&group, chars_per_token);
            if group_tokens <= token_budget {
                segments.push(group);
                continue;
            }

            tracing::debug!(
                "Paragraph group of ~{} tokens exceeds budget of {}; splitting by sentence",
                group_tokens,
                token_budget
            );
            let paragraphs = split_paragraphs(&group);
            let grouped = group_sentences(self.splitter, &paragraphs, token_budget, chars_per_token);
            if grouped.is_empty() {
                tracing::debug!("No sentences found in paragraph group; skipping");
                continue;
            }
            segments.extend(grouped);
        }

        segments.retain(|s| !s.trim().is_empty());
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::ParagraphChunker;
    use crate::chunk::sentence::RegexSentenceSplitter;
    use crate::utils::estimate_tokens;

    #[test]
    fn fitting_group_keeps_paragraph_breaks() {
        let chunker = ParagraphChunker::new(&RegexSentenceSplitter);
        assert_eq!(
            chunker.chunk("Para one text.\n\nPara two text.", 1000, 1000, 3.0),
            vec!["Para one text.\n\nPara two text."]
        );
    }

    #[test]
    fn oversized_group_is_split_into_sentences() {
        let chunker = ParagraphChunker::new(&RegexSentenceSplitter);
        let text = "This is sentence one. This is sentence two. This is sentence three, which is also short. This is sentence four. This is sentence five. This is sentence six.";
        let segments = chunker.chunk(text, 2000, 20, 3.0);
        assert_eq!(
            segments,
            vec![
                "This is sentence one. This is sentence two.",
                "This is sentence three, which is also short.",
                "This is sentence four. This is sentence five.",
                "This is sentence six.",
            ]
        );
        for segment in &segments {
            assert!(estimate_tokens(segment, 3.0) <= 20);
        }
    }

    #[test]
    fn long_sentence_uses_character_fallback() {
        let chunker = ParagraphChunker::new(&RegexSentenceSplitter);
        let text = "This single sentence is deliberately made very long to test the fallback character splitting mechanism because it will exceed the token limit.";
        let segments = chunker.chunk(text, 2000, 10, 3.0);
        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.chars().count() <= 30, "too long: {segment:?}");
        }
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        let chunker = ParagraphChunker::new(&RegexSentenceSplitter);
        assert!(chunker.chunk(" \n\n \t\n", 1000, 100, 3.0).is_empty());
    }
}
