//! Configuration loading and merging
//!
//! Settings come from a config file next to the chapters (or given with
//! `--config`) and from CLI flags, with precedence CLI > File > Defaults.

pub mod loader;
pub mod merge;

pub use loader::{load_config, load_report_config};
pub use merge::{merge_cli_with_config, CliOverrides};
