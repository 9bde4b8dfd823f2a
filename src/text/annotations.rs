//! Style annotations.
//!
//! Annotated chapters mark delivery styles with a tag at the start of a line:
//!
//! ```text
//! [WHISPER] Do not wake the guards.
//! They slept on.
//! [SHOUT] Run!
//! ```
//!
//! Only tags listed in the known styles switch style; any other bracketed
//! prefix is ordinary text.

use crate::domain::DEFAULT_STYLE;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static STYLE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[([A-Za-z0-9_]+)\]\s*(.*)$").expect("valid style tag regex"));

/// A run of consecutive lines sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSection {
    pub style: String,
    pub text: String,
}

/// Group lines by the most recent known style tag.
///
/// Blank lines are dropped. Repeating the current tag does not start a new
/// section.
pub fn parse_annotated_text<S: AsRef<str>>(text: &str, known_styles: &[S]) -> Vec<StyledSection> {
    let mut sections = Vec::new();
    let mut current_style = DEFAULT_STYLE.to_string();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let tagged = STYLE_TAG_RE.captures(line).and_then(|caps| {
            let key = caps.get(1)?.as_str();
            if known_styles.iter().any(|s| s.as_ref() == key) {
                Some((key, caps.get(2).map_or("", |m| m.as_str().trim())))
            } else {
                tracing::debug!("Unknown style tag [{}]; keeping line as text", key);
                None
            }
        });

        match tagged {
            Some((style, rest)) => {
                if style != current_style {
                    flush(&mut sections, &current_style, &mut lines);
                    current_style = style.to_string();
                }
                if !rest.is_empty() {
                    lines.push(rest);
                }
            }
            None => {
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            }
        }
    }

    flush(&mut sections, &current_style, &mut lines);
    sections
}

fn flush(sections: &mut Vec<StyledSection>, style: &str, lines: &mut Vec<&str>) {
    let text = lines.join("\n");
    lines.clear();
    let text = text.trim();
    if !text.is_empty() {
        sections.push(StyledSection { style: style.to_string(), text: text.to_string() });
    }
}
