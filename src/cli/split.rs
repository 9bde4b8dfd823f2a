//! Split command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

use super::utils::{build_segmenter, discover_chapters, process_chapter, BudgetArgs};
use crate::render::{render_jsonl, render_text, write_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Jsonl,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Chapter file, or directory of .txt chapters
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Write <chapter>.jsonl files and report.json here instead of stdout
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (default: text on stdout, jsonl in an output directory)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit generated_at from report.json (for reproducible output)
    #[arg(long)]
    pub no_timestamp: bool,

    #[command(flatten)]
    pub budget: BudgetArgs,
}

pub fn run(args: SplitArgs) -> Result<()> {
    let segmenter = build_segmenter(&args.path, &args.budget)?;
    let chapters = discover_chapters(&args.path)?;

    let Some(output_dir) = args.output_dir.as_ref() else {
        let format = args.format.unwrap_or(OutputFormat::Text);
        let mut records = Vec::new();
        for path in &chapters {
            let (chapter_records, _) = process_chapter(&segmenter, path)?;
            records.extend(chapter_records);
        }
        let rendered = match format {
            OutputFormat::Text => render_text(&records),
            OutputFormat::Jsonl => render_jsonl(&records),
        };
        print!("{}", rendered);
        return Ok(());
    };

    let format = args.format.unwrap_or(OutputFormat::Jsonl);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed creating output directory: {}", output_dir.display()))?;

    let mut output_files = Vec::with_capacity(chapters.len());
    let mut all_stats = Vec::with_capacity(chapters.len());
    for path in &chapters {
        let (records, stats) = process_chapter(&segmenter, path)?;
        let (file_name, rendered) = match format {
            OutputFormat::Jsonl => (format!("{}.jsonl", stats.chapter), render_jsonl(&records)),
            OutputFormat::Text => (format!("{}.txt", stats.chapter), render_text(&records)),
        };
        let out_path = output_dir.join(&file_name);
        fs::write(&out_path, rendered)
            .with_context(|| format!("Failed writing {}", out_path.display()))?;
        output_files.push(file_name);
        all_stats.push(stats);
    }

    write_report(
        &output_dir.join("report.json"),
        segmenter.config(),
        segmenter.splitter().name(),
        &all_stats,
        &output_files,
        !args.no_timestamp,
    )?;

    let total: usize = all_stats.iter().map(|s| s.segments).sum();
    println!(
        "Wrote {} segments from {} chapters to {}",
        total,
        all_stats.len(),
        output_dir.display()
    );
    Ok(())
}
