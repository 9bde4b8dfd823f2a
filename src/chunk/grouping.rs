//! Greedy packing of text units into budget-sized segments.
//!
//! One algorithm serves every unit granularity (sentences, lines): units are
//! appended to an accumulator while the estimate of the joined text stays
//! within the token budget. A unit that is over budget on its own flushes the
//! accumulator and is handed to a fallback splitter whose pieces are emitted
//! as-is.

use super::hard_split::split_by_chars;
use super::sentence::SentenceSplitter;
use crate::utils::tokens_for_chars;

/// Group `units` joined by `separator`, hard-splitting any unit that is over
/// budget by itself.
pub fn group_units<S: AsRef<str>>(
    units: &[S],
    token_budget: usize,
    chars_per_token: f64,
    separator: &str,
) -> Vec<String> {
    group_units_with(units, token_budget, chars_per_token, separator, |unit| {
        split_by_chars(unit, token_budget, chars_per_token)
    })
}

/// Same as [`group_units`], with a caller-chosen splitter for oversized units.
pub fn group_units_with<S, F>(
    units: &[S],
    token_budget: usize,
    chars_per_token: f64,
    separator: &str,
    mut split_oversized: F,
) -> Vec<String>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Vec<String>,
{
    let separator_chars = separator.chars().count();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for unit in units {
        let unit = unit.as_ref().trim();
        if unit.is_empty() {
            continue;
        }

        let unit_chars = unit.chars().count();
        let unit_tokens = tokens_for_chars(unit_chars, chars_per_token);

        if unit_tokens > token_budget {
            flush(&mut segments, &mut current, &mut current_chars);
            tracing::debug!(
                "Unit of {} chars (~{} tokens) exceeds budget of {}; splitting further",
                unit_chars,
                unit_tokens,
                token_budget
            );
            segments.extend(
                split_oversized(unit).into_iter().filter(|piece| !piece.trim().is_empty()),
            );
            continue;
        }

        let candidate_chars =
            if current.is_empty() { unit_chars } else { current_chars + separator_chars + unit_chars };

        if tokens_for_chars(candidate_chars, chars_per_token) <= token_budget {
            if !current.is_empty() {
                current.push_str(separator);
            }
            current.push_str(unit);
            current_chars = candidate_chars;
        } else {
            flush(&mut segments, &mut current, &mut current_chars);
            current.push_str(unit);
            current_chars = unit_chars;
        }
    }

    flush(&mut segments, &mut current, &mut current_chars);
    segments
}

/// Split each block into sentences and pack them with a single space.
///
/// Sentences never straddle two blocks, so paragraph boundaries always stay
/// sentence boundaries.
pub fn group_sentences<S: AsRef<str>>(
    splitter: &dyn SentenceSplitter,
    blocks: &[S],
    token_budget: usize,
    chars_per_token: f64,
) -> Vec<String> {
    let sentences: Vec<String> =
        blocks.iter().flat_map(|block| splitter.split(block.as_ref())).collect();
    group_units(&sentences, token_budget, chars_per_token, " ")
}

fn flush(segments: &mut Vec<String>, current: &mut String, current_chars: &mut usize) {
    if !current.trim().is_empty() {
        segments.push(std::mem::take(current));
    } else {
        current.clear();
    }
    *current_chars = 0;
}
