//! Config file loading

use crate::domain::SegmenterConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: &[&str] = &[
    "tts-segmenter.toml",
    ".tts-segmenter.toml",
    "segmenter.toml",
    ".segmenter.toml",
    "segmenter.yml",
    ".segmenter.yml",
    "segmenter.yaml",
    ".segmenter.yaml",
];

const SECTION_NAMES: &[&str] = &["tts-segmenter", "segmenter"];

/// Load settings from `config_path`, or from the first config file found in
/// `search_dir`.
///
/// An explicitly given file that cannot be parsed is an error. A discovered
/// one only logs a warning and yields the defaults.
pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<SegmenterConfig> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(SegmenterConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if explicit => Err(e),
        Err(e) => {
            tracing::warn!("Ignoring auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(SegmenterConfig::default())
        }
    }
}

/// Parse TOML config, supporting nested [tts-segmenter] or [segmenter] sections.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<SegmenterConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = SECTION_NAMES
        .iter()
        .find_map(|name| raw.get(name).cloned())
        .unwrap_or(raw);

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting nested tts-segmenter or segmenter sections.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<SegmenterConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null; treat it as "no settings".
    if raw.is_null() {
        return Ok(SegmenterConfig::default());
    }

    let config_val = SECTION_NAMES
        .iter()
        .find_map(|name| raw.get(name).cloned())
        .unwrap_or(raw);

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

/// Settings recorded in a `report.json` written by `split`, if one exists.
///
/// Keys the config does not know (such as `splitter_used`) are ignored.
pub fn load_report_config(report_path: &Path) -> Result<Option<SegmenterConfig>> {
    if !report_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(report_path)
        .with_context(|| format!("Failed reading report: {}", report_path.display()))?;
    let report: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid report JSON: {}", report_path.display()))?;
    let Some(config) = report.get("config") else {
        anyhow::bail!("Report has no config section: {}", report_path.display());
    };
    let config = serde_json::from_value(config.clone())
        .with_context(|| format!("Invalid config in report: {}", report_path.display()))?;
    Ok(Some(config))
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|name| search_dir.join(name)).find(|path| path.is_file())
}
