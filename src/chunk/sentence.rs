//! Sentence boundary detection.
//!
//! Two interchangeable implementations sit behind [`SentenceSplitter`]:
//!
//! - [`PragmaticSentenceSplitter`] wraps the rule-based `pragmatic_segmenter`
//!   crate (abbreviations, quotations, lists). Only built with the `pragmatic`
//!   feature.
//! - [`RegexSentenceSplitter`] cuts after `.`, `!` or `?` (plus any closing
//!   quotes or brackets) when whitespace or the end of the text follows.
//!   It mis-splits abbreviations like "Mr." but never drops text.
//!
//! [`build_sentence_splitter`] picks one from configuration and falls back to
//! the regex splitter when the rule-based one is unavailable.

use crate::domain::SplitterKind;
use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*(?:\s+|$)"#).expect("valid sentence end regex")
});

/// Splits a block of text into trimmed, non-empty sentences in reading order.
pub trait SentenceSplitter {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    fn split(&self, text: &str) -> Vec<String>;
}

/// Punctuation-and-whitespace heuristic splitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSentenceSplitter;

impl SentenceSplitter for RegexSentenceSplitter {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut last = 0usize;

        for m in SENTENCE_END_RE.find_iter(text) {
            push_trimmed(&mut sentences, &text[last..m.end()]);
            last = m.end();
        }
        push_trimmed(&mut sentences, &text[last..]);

        sentences
    }
}

#[cfg(feature = "pragmatic")]
pub struct PragmaticSentenceSplitter {
    inner: pragmatic_segmenter::Segmenter,
}

#[cfg(feature = "pragmatic")]
impl PragmaticSentenceSplitter {
    pub fn new() -> anyhow::Result<Self> {
        let inner = pragmatic_segmenter::Segmenter::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialise pragmatic segmenter: {:?}", e))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "pragmatic")]
impl SentenceSplitter for PragmaticSentenceSplitter {
    fn name(&self) -> &'static str {
        "pragmatic"
    }

    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for sentence in self.inner.segment(text) {
            push_trimmed(&mut sentences, sentence);
        }
        sentences
    }
}

/// Split `text` with the regex heuristic.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    RegexSentenceSplitter.split(text)
}

/// Build the splitter selected by `kind`.
///
/// `Pragmatic` and `Auto` degrade to the regex splitter when the rule-based
/// segmenter is not compiled in or fails to load; only an explicit
/// `Pragmatic` request warns about it.
pub fn build_sentence_splitter(kind: SplitterKind) -> Box<dyn SentenceSplitter> {
    match kind {
        SplitterKind::Regex => Box::new(RegexSentenceSplitter),
        SplitterKind::Pragmatic | SplitterKind::Auto => match load_pragmatic() {
            Ok(splitter) => splitter,
            Err(reason) => {
                if kind == SplitterKind::Pragmatic {
                    tracing::warn!("{}; falling back to regex sentence splitting", reason);
                } else {
                    tracing::debug!("{}; using regex sentence splitting", reason);
                }
                Box::new(RegexSentenceSplitter)
            }
        },
    }
}

#[cfg(feature = "pragmatic")]
fn load_pragmatic() -> Result<Box<dyn SentenceSplitter>, String> {
    PragmaticSentenceSplitter::new()
        .map(|s| Box::new(s) as Box<dyn SentenceSplitter>)
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "pragmatic"))]
fn load_pragmatic() -> Result<Box<dyn SentenceSplitter>, String> {
    Err("Built without the `pragmatic` feature".to_string())
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_splits_on_terminal_punctuation() {
        assert_eq!(
            split_into_sentences("Hello world. This is a test. Is it?"),
            vec!["Hello world.", "This is a test.", "Is it?"]
        );
    }

    #[test]
    fn regex_keeps_closing_quotes_with_sentence() {
        assert_eq!(
            split_into_sentences("Mr. Smith went to Washington. He said \"Hello!\" then left."),
            vec!["Mr.", "Smith went to Washington.", "He said \"Hello!\"", "then left."]
        );
    }

    #[test]
    fn regex_does_not_split_inside_numbers() {
        assert_eq!(
            split_into_sentences("Pi is 3.14 roughly. Wait!"),
            vec!["Pi is 3.14 roughly.", "Wait!"]
        );
    }

    #[test]
    fn regex_keeps_unterminated_tail() {
        assert_eq!(split_into_sentences("One. two without end"), vec!["One.", "two without end"]);
    }

    #[test]
    fn regex_handles_empty_input() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   ").is_empty());
    }

    #[test]
    fn regex_loses_no_text() {
        let text = "First line!\nSecond (aside.) Third? \"Quoted.\" End";
        let rebuilt: String = split_into_sentences(text).concat();
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let rebuilt: String = rebuilt.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn explicit_regex_kind_builds_regex_splitter() {
        assert_eq!(build_sentence_splitter(SplitterKind::Regex).name(), "regex");
    }

    #[test]
    fn auto_kind_always_yields_a_working_splitter() {
        let splitter = build_sentence_splitter(SplitterKind::Auto);
        let sentences = splitter.split("The cat sat. The dog ran.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "The cat sat.");
    }

    #[cfg(feature = "pragmatic")]
    #[test]
    fn pragmatic_keeps_abbreviations_inside_sentences() {
        let splitter = PragmaticSentenceSplitter::new().expect("pragmatic segmenter");
        assert_eq!(splitter.name(), "pragmatic");
        let sentences = splitter.split("Mr. Smith went home. He slept.");
        assert_eq!(sentences, vec!["Mr. Smith went home.", "He slept."]);
        assert_eq!(split_into_sentences("Mr. Smith went home. He slept.").len(), 3);
    }
}
