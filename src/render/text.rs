//! Human-readable segment listing for the terminal.

use crate::domain::SegmentRecord;

/// One header line per segment followed by its text, segments separated by
/// a blank line.
pub fn render_text(records: &[SegmentRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "### {} {} [{}] ~{} tokens\n",
            record.chapter, record.job, record.style, record.tokens
        ));
        out.push_str(&record.text);
        out.push('\n');
    }
    out
}
