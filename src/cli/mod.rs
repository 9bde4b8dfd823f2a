//! Command-line interface for tts-segmenter
//!
//! `split` writes one JSONL file per chapter plus `report.json`; each record is
//! one TTS request. When the engine rejects a segment, `resplit --job <suffix>`
//! re-splits that record one level finer with the settings recorded in the
//! report, and the chapter file can be fed to the engine again. `info` prints
//! segment statistics without writing anything.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod info;
mod resplit;
mod split;
mod utils;

/// Split book chapters into budget-sized segments for text-to-speech
#[derive(Parser)]
#[command(name = "tts-segment")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment chapters and print or write the segments
    Split(split::SplitArgs),

    /// Show segmentation statistics without writing anything
    Info(info::InfoArgs),

    /// Re-split a failed segment of a written chapter one level finer
    Resplit(resplit::ResplitArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Split(args) => split::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Resplit(args) => resplit::run(args),
    }
}
