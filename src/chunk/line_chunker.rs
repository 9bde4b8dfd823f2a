//! Line-based chunking.
//!
//! For text whose structure lives in single lines (dialogue, scripts,
//! translated chapters with one paragraph per line). Lines are packed with a
//! newline separator; a line that is over budget by itself falls back to
//! sentence grouping, and only its oversized sentences are hard-split.

use super::grouping::{group_sentences, group_units_with};
use super::paragraph::split_lines;
use super::sentence::SentenceSplitter;

pub struct LineChunker<'a> {
    splitter: &'a dyn SentenceSplitter,
}

impl<'a> LineChunker<'a> {
    pub fn new(splitter: &'a dyn SentenceSplitter) -> Self {
        Self { splitter }
    }

    pub fn chunk(&self, content: &str, token_budget: usize, chars_per_token: f64) -> Vec<String> {
        let lines = split_lines(content);
        if lines.is_empty() {
            return Vec::new();
        }

        group_units_with(&lines, token_budget, chars_per_token, "\n", |line| {
            group_sentences(self.splitter, &[line], token_budget, chars_per_token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LineChunker;
    use crate::chunk::sentence::RegexSentenceSplitter;
    use crate::utils::estimate_tokens;

    #[test]
    fn packs_lines_with_newlines() {
        let chunker = LineChunker::new(&RegexSentenceSplitter);
        let text = "\"Who goes there?\"\n\n\"A friend.\"\n\"Advance, friend.\"";
        assert_eq!(
            chunker.chunk(text, 100, 3.0),
            vec!["\"Who goes there?\"\n\"A friend.\"\n\"Advance, friend.\""]
        );
    }

    #[test]
    fn splits_between_lines_when_budget_is_hit() {
        let chunker = LineChunker::new(&RegexSentenceSplitter);
        // Each line is 10 chars (4 tokens); two lines plus newline are 21 chars (7 tokens).
        let text = "line one!!\nline two!!\nline 3!!!!";
        assert_eq!(
            chunker.chunk(text, 7, 3.0),
            vec!["line one!!\nline two!!", "line 3!!!!"]
        );
    }

    #[test]
    fn oversized_line_falls_back_to_sentences() {
        let chunker = LineChunker::new(&RegexSentenceSplitter);
        let text = "Short.\nThe first sentence is here. The second one follows. The third one ends it.\nTail.";
        let segments = chunker.chunk(text, 10, 3.0);
        assert_eq!(
            segments,
            vec![
                "Short.",
                "The first sentence is here.",
                "The second one follows.",
                "The third one ends it.",
                "Tail."
            ]
        );
        for segment in &segments {
            assert!(estimate_tokens(segment, 3.0) <= 10);
        }
    }

    #[test]
    fn empty_text_yields_nothing() {
        let chunker = LineChunker::new(&RegexSentenceSplitter);
        assert!(chunker.chunk("\n \n", 10, 3.0).is_empty());
    }
}
