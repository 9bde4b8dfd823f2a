//! Token estimation

/// Smallest chars-per-token ratio the estimator accepts.
pub const MIN_CHARS_PER_TOKEN: f64 = 1.0;

/// Clamp a chars-per-token estimate into the range the estimator accepts.
///
/// NaN and anything below 1.0 become 1.0, so the division in
/// [`estimate_tokens`] can never blow up.
pub fn effective_chars_per_token(chars_per_token: f64) -> f64 {
    chars_per_token.max(MIN_CHARS_PER_TOKEN)
}

/// Estimate tokens as `ceil(chars / chars_per_token)`.
///
/// `chars` counts Unicode code points, not bytes. Byte length over-counts for
/// multi-byte UTF-8 content (e.g. CJK text, emoji). Whitespace-only text is
/// zero tokens.
pub fn estimate_tokens(text: &str, chars_per_token: f64) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    tokens_for_chars(text.chars().count(), chars_per_token)
}

/// Token estimate for a known character count.
pub fn tokens_for_chars(chars: usize, chars_per_token: f64) -> usize {
    if chars == 0 {
        return 0;
    }
    (chars as f64 / effective_chars_per_token(chars_per_token)).ceil() as usize
}

/// Character budget implied by a token budget: `max(1, floor(tokens * cpt))`.
pub fn char_limit_for_tokens(token_budget: usize, chars_per_token: f64) -> usize {
    let limit = (token_budget as f64 * effective_chars_per_token(chars_per_token)).floor();
    (limit as usize).max(1)
}
