//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{build_segmenter, discover_chapters, process_chapter, BudgetArgs};

#[derive(Args)]
pub struct InfoArgs {
    /// Chapter file, or directory of .txt chapters
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub budget: BudgetArgs,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let segmenter = build_segmenter(&args.path, &args.budget)?;
    let chapters = discover_chapters(&args.path)?;
    let config = segmenter.config();

    println!("Splitter: {}", segmenter.splitter().name());
    println!("Mode: {}", config.mode);
    println!(
        "Token budget: {} (~{} chars at {} chars/token)",
        config.token_budget,
        config.char_limit(),
        config.chars_per_token
    );

    println!("Chapters:");
    let mut totals = (0usize, 0usize, 0usize, 0usize);
    for path in &chapters {
        let (_, stats) = process_chapter(&segmenter, path)?;
        println!(
            "  {}: {} segments, max {} tokens, avg {:.1} tokens, {} over budget ({}, {} chars)",
            stats.chapter,
            stats.segments,
            stats.max_tokens,
            stats.avg_tokens(),
            stats.over_budget,
            stats.encoding,
            stats.input_chars
        );
        totals.0 += stats.segments;
        totals.1 += stats.total_tokens;
        totals.2 = totals.2.max(stats.max_tokens);
        totals.3 += stats.over_budget;
    }

    let (segments, total_tokens, max_tokens, over_budget) = totals;
    let avg = if segments == 0 { 0.0 } else { total_tokens as f64 / segments as f64 };
    println!("Statistics:");
    println!("  Chapters: {}", chapters.len());
    println!("  Segments: {}", segments);
    println!("  Estimated tokens: {}", total_tokens);
    println!("  Max tokens per segment: {}", max_tokens);
    println!("  Avg tokens per segment: {:.1}", avg);
    println!("  Segments over budget: {}", over_budget);

    Ok(())
}
