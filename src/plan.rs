//! Retry planning for segments a TTS engine rejects.
//!
//! Every segment starts as a job at [`FallbackLevel::Line`]. When synthesis of
//! a job fails, [`SegmentJob::fallback`] re-splits its text one level finer:
//! one job per sentence first, then hard character cuts. A job that fails at
//! the character level has nowhere left to go.
//!
//! Suffixes encode the path a piece took (`l_003_s_02_f_01`), so audio files
//! named after them sort back into reading order.

use crate::chunk::{split_by_chars, SentenceSplitter, StyledSegment};
use crate::domain::SegmenterConfig;
use crate::utils::estimate_tokens;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackLevel {
    Line,
    Sentence,
    Force,
}

impl fmt::Display for FallbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackLevel::Line => write!(f, "line"),
            FallbackLevel::Sentence => write!(f, "sentence"),
            FallbackLevel::Force => write!(f, "force"),
        }
    }
}

impl FallbackLevel {
    /// Level a job reached, read back from its suffix.
    pub fn from_suffix(suffix: &str) -> Self {
        let mut parts = suffix.rsplit('_');
        let _counter = parts.next();
        match parts.next() {
            Some("f") => FallbackLevel::Force,
            Some("s") => FallbackLevel::Sentence,
            _ => FallbackLevel::Line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentJob {
    pub text: String,
    pub style: String,
    pub suffix: String,
    pub level: FallbackLevel,
}

/// Wrap freshly segmented text as first-level jobs (`l_001`, `l_002`, ...).
pub fn initial_jobs(segments: &[StyledSegment]) -> Vec<SegmentJob> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| SegmentJob {
            text: segment.text.clone(),
            style: segment.style.clone(),
            suffix: format!("l_{:03}", i + 1),
            level: FallbackLevel::Line,
        })
        .collect()
}

impl SegmentJob {
    /// Replacement jobs for a failed job, or `None` once character splitting
    /// has also failed.
    ///
    /// The sentence level gives every sentence its own job. A level that
    /// would hand back the job's text unchanged is skipped.
    pub fn fallback(
        &self,
        config: &SegmenterConfig,
        splitter: &dyn SentenceSplitter,
    ) -> Option<Vec<SegmentJob>> {
        let mut level = self.level;
        loop {
            let (pieces, tag, next) = match level {
                FallbackLevel::Line => (self.sentence_pieces(config, splitter), "s", FallbackLevel::Sentence),
                FallbackLevel::Sentence => (
                    split_by_chars(&self.text, config.token_budget, config.chars_per_token),
                    "f",
                    FallbackLevel::Force,
                ),
                FallbackLevel::Force => return None,
            };

            if pieces.is_empty() {
                return None;
            }
            if pieces.len() == 1 && pieces[0] == self.text.trim() {
                tracing::debug!("Job {} unchanged at {} level", self.suffix, next);
                level = next;
                continue;
            }

            tracing::debug!("Job {} re-split into {} {} jobs", self.suffix, pieces.len(), next);
            return Some(
                pieces
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| SegmentJob {
                        text,
                        style: self.style.clone(),
                        suffix: format!("{}_{}_{:02}", self.suffix, tag, i + 1),
                        level: next,
                    })
                    .collect(),
            );
        }
    }

    /// One piece per sentence; sentences over budget are cut by characters.
    fn sentence_pieces(&self, config: &SegmenterConfig, splitter: &dyn SentenceSplitter) -> Vec<String> {
        splitter
            .split(&self.text)
            .into_iter()
            .flat_map(|sentence| {
                if estimate_tokens(&sentence, config.chars_per_token) > config.token_budget {
                    split_by_chars(&sentence, config.token_budget, config.chars_per_token)
                } else {
                    vec![sentence]
                }
            })
            .collect()
    }
}

/// Replace the job at `index` with its fallback jobs, in place.
///
/// Returns `false` (leaving the queue untouched) when the job cannot be
/// split further.
pub fn expand_failed_job(
    jobs: &mut Vec<SegmentJob>,
    index: usize,
    config: &SegmenterConfig,
    splitter: &dyn SentenceSplitter,
) -> bool {
    let Some(job) = jobs.get(index) else {
        return false;
    };
    match job.fallback(config, splitter) {
        Some(replacements) => {
            jobs.splice(index..=index, replacements);
            true
        }
        None => false,
    }
}
