//! Resplit command: re-split a segment the TTS engine rejected.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::utils::{build_records, build_segmenter, segmenter_from, BudgetArgs};
use crate::config::load_report_config;
use crate::domain::SegmentRecord;
use crate::plan::{expand_failed_job, FallbackLevel, SegmentJob};
use crate::render::render_jsonl;

#[derive(Args)]
pub struct ResplitArgs {
    /// Chapter JSONL file written by `split`
    #[arg(value_name = "JSONL")]
    pub segments: PathBuf,

    /// Job suffix of the failed segment (e.g., l_003 or l_003_s_01)
    #[arg(short = 'j', long, value_name = "JOB")]
    pub job: String,

    /// Rewrite the JSONL file in place instead of printing to stdout
    #[arg(long)]
    pub in_place: bool,

    #[command(flatten)]
    pub budget: BudgetArgs,
}

pub fn run(args: ResplitArgs) -> Result<()> {
    // Settings come from the report `split` wrote next to the JSONL, unless a
    // config file is given explicitly.
    let report_path = args.segments.with_file_name("report.json");
    let segmenter = match args.budget.config {
        Some(_) => build_segmenter(&args.segments, &args.budget)?,
        None => match load_report_config(&report_path)? {
            Some(base) => {
                tracing::debug!("Using settings from {}", report_path.display());
                segmenter_from(base, &args.budget)?
            }
            None => build_segmenter(&args.segments, &args.budget)?,
        },
    };
    let content = fs::read_to_string(&args.segments)
        .with_context(|| format!("Failed reading {}", args.segments.display()))?;

    let records = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<SegmentRecord>(line).with_context(|| {
                format!("Invalid segment record on line {} of {}", n + 1, args.segments.display())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(chapter) = records.first().map(|r| r.chapter.clone()) else {
        anyhow::bail!("No segments in {}", args.segments.display());
    };

    let mut jobs: Vec<SegmentJob> = records
        .into_iter()
        .map(|r| SegmentJob {
            level: FallbackLevel::from_suffix(&r.job),
            text: r.text,
            style: r.style,
            suffix: r.job,
        })
        .collect();

    let Some(index) = jobs.iter().position(|j| j.suffix == args.job) else {
        anyhow::bail!("Job {} not found in {}", args.job, args.segments.display());
    };

    if !expand_failed_job(&mut jobs, index, segmenter.config(), segmenter.splitter()) {
        anyhow::bail!("Job {} cannot be split further", args.job);
    }

    let rendered = render_jsonl(&build_records(&chapter, segmenter.config(), jobs));
    if args.in_place {
        fs::write(&args.segments, rendered)
            .with_context(|| format!("Failed writing {}", args.segments.display()))?;
    } else {
        print!("{}", rendered);
    }
    Ok(())
}
