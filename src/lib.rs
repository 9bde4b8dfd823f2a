//! tts-segmenter: split book chapters into segments sized for TTS engines.
//!
//! Every segment stays within an estimated token budget, keeps the source
//! text in order, and breaks at paragraph, line or sentence boundaries
//! whenever the budget allows.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod domain;
pub mod plan;
pub mod render;
pub mod text;
pub mod utils;

pub use chunk::{segment_text, Segmenter, StyledSegment};
pub use domain::{ConfigError, SegmenterConfig, SplitterKind, UnitMode};
