//! Report JSON generation.

use crate::domain::{ChapterStats, SegmenterConfig, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn write_report(
    report_path: &Path,
    config: &SegmenterConfig,
    splitter_name: &str,
    chapters: &[ChapterStats],
    output_files: &[String],
    include_timestamp: bool,
) -> Result<()> {
    let mut sorted_output_files = output_files.to_vec();
    sorted_output_files.sort();

    let mut config_value = serde_json::to_value(config)?;
    if let Value::Object(map) = &mut config_value {
        map.insert("splitter_used".to_string(), Value::String(splitter_name.to_string()));
    }

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("config".to_string(), config_value);
    report.insert("stats".to_string(), stats_value(chapters));
    report.insert("output_files".to_string(), serde_json::to_value(sorted_output_files)?);

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)
        .with_context(|| format!("Failed writing report: {}", report_path.display()))?;
    Ok(())
}

fn stats_value(chapters: &[ChapterStats]) -> Value {
    let per_chapter = chapters
        .iter()
        .map(|c| {
            json!({
                "chapter": c.chapter,
                "encoding": c.encoding,
                "input_chars": c.input_chars,
                "segments": c.segments,
                "max_tokens": c.max_tokens,
                "avg_tokens": round_avg(c.avg_tokens()),
                "over_budget": c.over_budget,
            })
        })
        .collect::<Vec<_>>();

    let segments: usize = chapters.iter().map(|c| c.segments).sum();
    let total_tokens: usize = chapters.iter().map(|c| c.total_tokens).sum();
    json!({
        "chapters": per_chapter,
        "totals": {
            "chapters": chapters.len(),
            "segments": segments,
            "total_tokens": total_tokens,
            "max_tokens": chapters.iter().map(|c| c.max_tokens).max().unwrap_or(0),
            "over_budget": chapters.iter().map(|c| c.over_budget).sum::<usize>(),
        },
    })
}

fn round_avg(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
