//! Chapter segmentation.
//!
//! The cascade, from coarse to fine:
//!
//! 1. paragraphs combined up to a character budget ([`combine_paragraphs_by_chars`]),
//!    or newline-delimited lines in [`UnitMode::Line`];
//! 2. sentences packed greedily up to the token budget ([`group_units`]);
//! 3. hard character cuts for anything still too large ([`split_by_chars`]).
//!
//! None of these fail: empty input gives no segments and every oversized unit
//! is eventually cut small enough.

use crate::domain::{ConfigError, SegmenterConfig, UnitMode, DEFAULT_STYLE};
use crate::text::{normalize_text, parse_annotated_text};
use serde::Serialize;

pub mod grouping;
pub mod hard_split;
pub mod line_chunker;
pub mod paragraph;
pub mod paragraph_chunker;
pub mod sentence;

pub use grouping::{group_sentences, group_units, group_units_with};
pub use hard_split::split_by_chars;
pub use line_chunker::LineChunker;
pub use paragraph::{combine_paragraphs_by_chars, split_lines, split_paragraphs};
pub use paragraph_chunker::ParagraphChunker;
pub use sentence::{
    build_sentence_splitter, split_into_sentences, RegexSentenceSplitter, SentenceSplitter,
};

/// Segment `raw_text` in paragraph mode with the regex sentence splitter.
///
/// Use [`Segmenter`] for line mode or rule-based sentence detection.
pub fn segment_text(
    raw_text: &str,
    paragraph_char_budget: usize,
    token_budget: usize,
    chars_per_token: f64,
) -> Vec<String> {
    ParagraphChunker::new(&RegexSentenceSplitter).chunk(
        raw_text,
        paragraph_char_budget,
        token_budget,
        chars_per_token,
    )
}

/// A segment tagged with the delivery style it was annotated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSegment {
    pub style: String,
    pub text: String,
}

/// Configured segmentation pipeline.
pub struct Segmenter {
    config: SegmenterConfig,
    splitter: Box<dyn SentenceSplitter>,
}

impl Segmenter {
    /// Validate `config` and build the sentence splitter it selects.
    pub fn new(config: SegmenterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let splitter = build_sentence_splitter(config.splitter);
        tracing::debug!("Using {} sentence splitter", splitter.name());
        Ok(Self { config, splitter })
    }

    /// Like [`Segmenter::new`] with an explicit splitter.
    pub fn with_splitter(
        config: SegmenterConfig,
        splitter: Box<dyn SentenceSplitter>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, splitter })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    pub fn splitter(&self) -> &dyn SentenceSplitter {
        self.splitter.as_ref()
    }

    /// Segment text as-is in the configured unit mode.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let cfg = &self.config;
        match cfg.mode {
            UnitMode::Paragraph => ParagraphChunker::new(self.splitter()).chunk(
                text,
                cfg.paragraph_char_budget,
                cfg.token_budget,
                cfg.chars_per_token,
            ),
            UnitMode::Line => {
                LineChunker::new(self.splitter()).chunk(text, cfg.token_budget, cfg.chars_per_token)
            }
        }
    }

    /// Full chapter pipeline: optional normalization, optional style
    /// annotations, then [`Segmenter::segment`] per styled section.
    pub fn segment_chapter(&self, text: &str) -> Vec<StyledSegment> {
        let text = if self.config.normalize { normalize_text(text) } else { text.to_string() };

        if !self.config.annotated {
            return self
                .segment(&text)
                .into_iter()
                .map(|t| StyledSegment { style: DEFAULT_STYLE.to_string(), text: t })
                .collect();
        }

        parse_annotated_text(&text, &self.config.known_styles)
            .into_iter()
            .flat_map(|section| {
                self.segment(&section.text)
                    .into_iter()
                    .map(move |t| StyledSegment { style: section.style.clone(), text: t })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SplitterKind;
    use crate::utils::estimate_tokens;
    use similar_asserts::assert_eq;

    fn regex_config() -> SegmenterConfig {
        SegmenterConfig { splitter: SplitterKind::Regex, ..Default::default() }
    }

    fn non_ws(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    const CHAPTER: &str = "The rain had not stopped for three days. Mud covered the road to the old mill, and the carts sank to their axles.\n\n\"We wait,\" said the captain. Nobody argued.\n\nBy the fourth morning the sky cleared! The men cheered, packed their tents, and marched north before noon. Would the bridge still stand? Nobody knew.\n\nAn_absurdly_long_identifier_without_any_spaces_that_cannot_be_broken_on_words_at_all_and_keeps_going.";

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(segment_text("", 1000, 100, 3.0).is_empty());
        assert!(segment_text("  \n\n\t \n", 1000, 100, 3.0).is_empty());
    }

    #[test]
    fn single_short_sentence_is_one_segment() {
        assert_eq!(segment_text("Hello world.", 1000, 100, 3.0), vec!["Hello world."]);
    }

    #[test]
    fn short_paragraphs_are_combined() {
        assert_eq!(
            segment_text("Para one text.\n\nPara two text.", 1000, 1000, 3.0),
            vec!["Para one text.\n\nPara two text."]
        );
    }

    #[test]
    fn greedy_sentence_packing() {
        assert_eq!(segment_text("A. B. C.", 1000, 2, 3.0), vec!["A. B.", "C."]);
    }

    #[test]
    fn unbroken_run_is_sliced() {
        let text = "q".repeat(500);
        let segments = segment_text(&text, 1000, 10, 3.0);
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|s| !s.is_empty() && s.chars().count() <= 30));
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn properties_hold_across_budgets() {
        for &(para, budget, cpt) in
            &[(1100, 350, 3.0), (800, 170, 1.9), (200, 20, 2.5), (50, 5, 1.0), (1000, 1, 3.0)]
        {
            let segments = segment_text(CHAPTER, para, budget, cpt);
            assert!(!segments.is_empty());
            assert_eq!(non_ws(&segments.concat()), non_ws(CHAPTER), "content lost at {budget}");
            let mut cursor = 0usize;
            let flat = non_ws(CHAPTER);
            for segment in &segments {
                assert!(!segment.trim().is_empty());
                assert!(estimate_tokens(segment, cpt) <= budget, "{segment:?} over {budget}");
                let piece = non_ws(segment);
                let found = flat[cursor..].find(&piece).expect("segment in order");
                assert_eq!(found, 0);
                cursor += piece.len();
            }
        }
    }

    #[test]
    fn segmentation_is_deterministic() {
        assert_eq!(segment_text(CHAPTER, 300, 40, 2.0), segment_text(CHAPTER, 300, 40, 2.0));
    }

    #[test]
    fn resegmenting_keeps_content() {
        let first = segment_text(CHAPTER, 300, 40, 2.0);
        let joined = first.join("\n\n");
        let second = segment_text(&joined, 300, 40, 2.0);
        assert_eq!(non_ws(&second.concat()), non_ws(&first.concat()));
    }

    #[test]
    fn segmenter_rejects_invalid_config() {
        let cfg = SegmenterConfig { chars_per_token: 0.0, ..regex_config() };
        assert!(Segmenter::new(cfg).is_err());
    }

    struct SemicolonSplitter;

    impl SentenceSplitter for SemicolonSplitter {
        fn name(&self) -> &'static str {
            "semicolon"
        }

        fn split(&self, text: &str) -> Vec<String> {
            text.split(';').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
        }
    }

    #[test]
    fn custom_splitter_drives_sentence_grouping() {
        let cfg = SegmenterConfig { token_budget: 2, ..regex_config() };
        let segmenter =
            Segmenter::with_splitter(cfg, Box::new(SemicolonSplitter)).expect("segmenter");
        assert_eq!(segmenter.splitter().name(), "semicolon");
        assert_eq!(segmenter.segment("abc;def;gh"), vec!["abc", "def gh"]);

        let bad = SegmenterConfig { token_budget: 0, ..regex_config() };
        assert!(Segmenter::with_splitter(bad, Box::new(SemicolonSplitter)).is_err());
    }

    #[test]
    fn line_mode_joins_with_newlines() {
        let cfg = SegmenterConfig { mode: UnitMode::Line, ..regex_config() };
        let segmenter = Segmenter::new(cfg).expect("segmenter");
        assert_eq!(segmenter.segment("one\n\ntwo\nthree"), vec!["one\ntwo\nthree"]);
    }

    #[test]
    fn chapter_pipeline_normalizes_and_tracks_styles() {
        let cfg = SegmenterConfig {
            annotated: true,
            known_styles: vec!["WHISPER".to_string()],
            ..regex_config()
        };
        let segmenter = Segmenter::new(cfg).expect("segmenter");
        let segments = segmenter.segment_chapter("He spoke\u{2026}\n[WHISPER] \u{201C}Quiet.\u{201D}");
        assert_eq!(
            segments,
            vec![
                StyledSegment { style: DEFAULT_STYLE.into(), text: "He spoke...".into() },
                StyledSegment { style: "WHISPER".into(), text: "\"Quiet.\"".into() },
            ]
        );
    }

    #[test]
    fn chapter_pipeline_without_normalization_keeps_text() {
        let cfg = SegmenterConfig { normalize: false, ..regex_config() };
        let segmenter = Segmenter::new(cfg).expect("segmenter");
        let segments = segmenter.segment_chapter("It\u{2019}s here.");
        assert_eq!(segments[0].text, "It\u{2019}s here.");
        assert_eq!(segments[0].style, DEFAULT_STYLE);
    }
}
