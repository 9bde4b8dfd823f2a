//! Shared helpers.

pub mod encoding;
pub mod hashing;
pub mod tokens;

pub use encoding::read_file_safe;
pub use hashing::segment_id;
pub use tokens::{
    char_limit_for_tokens, effective_chars_per_token, estimate_tokens, tokens_for_chars,
};
