//! Output rendering (JSONL, plain text, reports)

pub mod jsonl;
pub mod report;
pub mod text;

pub use jsonl::render_jsonl;
pub use report::write_report;
pub use text::render_text;
