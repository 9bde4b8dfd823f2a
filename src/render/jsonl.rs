//! JSONL rendering, one segment per line.

use crate::domain::SegmentRecord;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn render_jsonl(records: &[SegmentRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        // BTreeMap keeps keys in alphabetical order.
        let mut entry: BTreeMap<&str, Value> = BTreeMap::new();
        entry.insert("chapter", Value::String(record.chapter.clone()));
        entry.insert("chars", Value::Number(record.chars.into()));
        entry.insert("id", Value::String(record.id.clone()));
        entry.insert("index", Value::Number(record.index.into()));
        entry.insert("job", Value::String(record.job.clone()));
        entry.insert("style", Value::String(record.style.clone()));
        entry.insert("text", Value::String(record.text.clone()));
        entry.insert("tokens", Value::Number(record.tokens.into()));

        match serde_json::to_string(&entry) {
            Ok(line) => lines.push(line),
            Err(e) => tracing::warn!("Skipping segment {}: {}", record.id, e),
        }
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
