//! Core configuration and output types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Style assigned to text before any annotation tag is seen.
pub const DEFAULT_STYLE: &str = "DEFAULT_STYLE";

/// How chapter text is broken into units before greedy grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    /// Blank-line separated prose paragraphs, combined by characters first.
    #[default]
    Paragraph,
    /// One logical unit per line (dialogue, scripts).
    Line,
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitMode::Paragraph => write!(f, "paragraph"),
            UnitMode::Line => write!(f, "line"),
        }
    }
}

/// Which sentence boundary detector to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplitterKind {
    /// Rule-based when available, regex otherwise.
    #[default]
    Auto,
    Pragmatic,
    Regex,
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitterKind::Auto => write!(f, "auto"),
            SplitterKind::Pragmatic => write!(f, "pragmatic"),
            SplitterKind::Regex => write!(f, "regex"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("chars_per_token must be a finite number >= 1.0, got {0}")]
    InvalidCharsPerToken(f64),
    #[error("paragraph_char_budget must be greater than zero")]
    ZeroParagraphBudget,
    #[error("token_budget must be greater than zero")]
    ZeroTokenBudget,
    #[error("invalid style name '{0}': use letters, digits and underscores")]
    InvalidStyle(String),
}

/// Segmentation settings, loadable from TOML/YAML and overridable from the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Maximum estimated tokens per segment.
    pub token_budget: usize,
    /// Average characters per token for the target engine and language.
    pub chars_per_token: f64,
    /// Character budget for the paragraph combination pass.
    pub paragraph_char_budget: usize,
    pub mode: UnitMode,
    pub splitter: SplitterKind,
    /// Normalize typography before segmenting.
    pub normalize: bool,
    /// Treat `[STYLE]` line prefixes as style annotations.
    pub annotated: bool,
    /// Style keys recognised when `annotated` is set.
    pub known_styles: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            token_budget: 350,
            chars_per_token: 3.0,
            paragraph_char_budget: 1100,
            mode: UnitMode::Paragraph,
            splitter: SplitterKind::Auto,
            normalize: true,
            annotated: false,
            known_styles: Vec::new(),
        }
    }
}

impl SegmenterConfig {
    /// Check the preconditions the segmenter relies on.
    ///
    /// The free functions in [`crate::chunk`] clamp bad values instead of
    /// failing; this is for configuration coming from users.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.chars_per_token.is_finite() || self.chars_per_token < 1.0 {
            return Err(ConfigError::InvalidCharsPerToken(self.chars_per_token));
        }
        if self.token_budget == 0 {
            return Err(ConfigError::ZeroTokenBudget);
        }
        if self.paragraph_char_budget == 0 {
            return Err(ConfigError::ZeroParagraphBudget);
        }
        if let Some(bad) = self
            .known_styles
            .iter()
            .find(|s| s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(ConfigError::InvalidStyle(bad.clone()));
        }
        Ok(())
    }

    /// Hard character limit implied by the token budget.
    pub fn char_limit(&self) -> usize {
        crate::utils::char_limit_for_tokens(self.token_budget, self.chars_per_token)
    }
}

/// One segment ready to be sent to a TTS engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: String,
    pub chapter: String,
    pub index: usize,
    pub job: String,
    pub style: String,
    pub text: String,
    pub chars: usize,
    pub tokens: usize,
}

/// Per-chapter segmentation statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChapterStats {
    pub chapter: String,
    pub encoding: String,
    pub input_chars: usize,
    pub segments: usize,
    pub max_tokens: usize,
    pub total_tokens: usize,
    pub over_budget: usize,
}

impl ChapterStats {
    pub fn avg_tokens(&self) -> f64 {
        if self.segments == 0 {
            0.0
        } else {
            self.total_tokens as f64 / self.segments as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SegmenterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_chars_per_token() {
        for bad in [0.0, 0.5, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SegmenterConfig { chars_per_token: bad, ..Default::default() };
            assert!(matches!(cfg.validate(), Err(ConfigError::InvalidCharsPerToken(_))));
        }
    }

    #[test]
    fn rejects_zero_budgets() {
        let cfg = SegmenterConfig { token_budget: 0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTokenBudget));
        let cfg = SegmenterConfig { paragraph_char_budget: 0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroParagraphBudget));
    }

    #[test]
    fn rejects_malformed_style_names() {
        let cfg = SegmenterConfig { known_styles: vec!["WHISPER".into(), "bad style".into()], ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidStyle("bad style".into())));
    }

    #[test]
    fn char_limit_follows_budget() {
        let cfg = SegmenterConfig { token_budget: 170, chars_per_token: 2.0, ..Default::default() };
        assert_eq!(cfg.char_limit(), 340);
    }
}
