//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::chunk::Segmenter;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{ChapterStats, SegmentRecord, SegmenterConfig, SplitterKind, UnitMode};
use crate::plan::{initial_jobs, SegmentJob};
use crate::utils::encoding::{is_binary_file, DEFAULT_SAMPLE_SIZE};
use crate::utils::{estimate_tokens, read_file_safe, segment_id};

/// Segmentation flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct BudgetArgs {
    /// Path to config file (tts-segmenter.toml or segmenter.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum estimated tokens per segment
    #[arg(short = 't', long, value_name = "TOKENS")]
    pub token_budget: Option<usize>,

    /// Average characters per token (>= 1.0)
    #[arg(long, value_name = "CHARS")]
    pub chars_per_token: Option<f64>,

    /// Character budget for combining paragraphs
    #[arg(long, value_name = "CHARS")]
    pub paragraph_chars: Option<usize>,

    /// Unit mode: paragraph or line
    #[arg(long, value_enum)]
    pub mode: Option<UnitMode>,

    /// Sentence splitter: auto, pragmatic or regex
    #[arg(long, value_enum)]
    pub splitter: Option<SplitterKind>,

    /// Keep typography as-is instead of normalizing it
    #[arg(long)]
    pub no_normalize: bool,

    /// Treat [STYLE] line prefixes as style annotations
    #[arg(long)]
    pub annotated: bool,

    /// Known style keys for annotations (comma-separated, e.g., 'WHISPER,SHOUT')
    #[arg(long, value_name = "KEYS")]
    pub styles: Option<String>,
}

impl BudgetArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            token_budget: self.token_budget,
            chars_per_token: self.chars_per_token,
            paragraph_char_budget: self.paragraph_chars,
            mode: self.mode,
            splitter: self.splitter,
            normalize: if self.no_normalize { Some(false) } else { None },
            annotated: if self.annotated { Some(true) } else { None },
            known_styles: parse_csv(&self.styles),
        }
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// Merge file config found near `input` with the CLI flags and build the
/// segmenter.
pub fn build_segmenter(input: &Path, args: &BudgetArgs) -> Result<Segmenter> {
    let search_dir = if input.is_dir() {
        input.to_path_buf()
    } else {
        input.parent().map(Path::to_path_buf).unwrap_or_default()
    };
    let search_dir = if search_dir.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        search_dir
    };

    let file_config = load_config(&search_dir, args.config.as_deref())?;
    segmenter_from(file_config, args)
}

/// Layer the CLI flags over `base` and build the segmenter.
pub fn segmenter_from(base: SegmenterConfig, args: &BudgetArgs) -> Result<Segmenter> {
    let merged = merge_cli_with_config(base, args.overrides());
    Segmenter::new(merged).context("Invalid segmenter configuration")
}

/// Chapter files for `input`: the file itself, or the `*.txt` files directly
/// inside a directory, sorted by name.
pub fn discover_chapters(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        anyhow::bail!("Path does not exist: {}", input.display());
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut chapters = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed listing {}", input.display()))?;
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
        if !entry.file_type().is_file() || !is_txt {
            continue;
        }
        if is_binary_file(path, DEFAULT_SAMPLE_SIZE) {
            tracing::warn!("Skipping binary file {}", path.display());
            continue;
        }
        chapters.push(path.to_path_buf());
    }

    if chapters.is_empty() {
        anyhow::bail!("No .txt chapter files found in {}", input.display());
    }
    Ok(chapters)
}

/// Chapter name used in ids and output file names.
pub fn chapter_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("chapter").to_string()
}

/// Read and segment one chapter file.
pub fn process_chapter(
    segmenter: &Segmenter,
    path: &Path,
) -> Result<(Vec<SegmentRecord>, ChapterStats)> {
    let (content, encoding) = read_file_safe(path)?;
    let chapter = chapter_name(path);
    let segments = segmenter.segment_chapter(&content);
    let records = build_records(&chapter, segmenter.config(), initial_jobs(&segments));

    let stats = chapter_stats(&chapter, &encoding, &content, &records, segmenter.config());
    tracing::debug!(
        "{}: {} chars ({}) -> {} segments",
        chapter,
        stats.input_chars,
        encoding,
        stats.segments
    );
    Ok((records, stats))
}

/// Number jobs in order and attach ids and token estimates.
pub fn build_records(
    chapter: &str,
    config: &SegmenterConfig,
    jobs: Vec<SegmentJob>,
) -> Vec<SegmentRecord> {
    jobs.into_iter()
        .enumerate()
        .map(|(index, job)| SegmentRecord {
            id: segment_id(chapter, index, &job.text),
            chapter: chapter.to_string(),
            index,
            job: job.suffix,
            style: job.style,
            chars: job.text.chars().count(),
            tokens: estimate_tokens(&job.text, config.chars_per_token),
            text: job.text,
        })
        .collect()
}

fn chapter_stats(
    chapter: &str,
    encoding: &str,
    content: &str,
    records: &[SegmentRecord],
    config: &SegmenterConfig,
) -> ChapterStats {
    ChapterStats {
        chapter: chapter.to_string(),
        encoding: encoding.to_string(),
        input_chars: content.chars().count(),
        segments: records.len(),
        max_tokens: records.iter().map(|r| r.tokens).max().unwrap_or(0),
        total_tokens: records.iter().map(|r| r.tokens).sum(),
        over_budget: records.iter().filter(|r| r.tokens > config.token_budget).count(),
    }
}
