//! Last-resort character splitting.

use crate::utils::char_limit_for_tokens;

/// Split `text` into pieces of at most `max(1, floor(token_budget * chars_per_token))`
/// characters.
///
/// Each cut prefers the last whitespace inside the window so words stay whole.
/// A window with no usable whitespace is cut exactly at the limit, even
/// mid-word; a single unbroken run never exceeds the budget.
pub fn split_by_chars(text: &str, token_budget: usize, chars_per_token: f64) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let char_limit = char_limit_for_tokens(token_budget, chars_per_token);

    let mut pieces = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        if chars[start].is_whitespace() {
            start += 1;
            continue;
        }

        let window_end = start.saturating_add(char_limit).min(chars.len());
        let mut split_at = window_end;

        if window_end < chars.len() {
            // The char at `window_end` is the first one left out, so a space
            // there still lets the whole window through.
            if let Some(boundary) =
                (start + 1..=window_end).rev().find(|&idx| chars[idx].is_whitespace())
            {
                split_at = boundary;
            }
        }

        // Always move forward, even if the boundary search misbehaves.
        let split_at = split_at.max(start + 1);

        let piece: String = chars[start..split_at].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }

        start = split_at;
    }

    pieces
}
