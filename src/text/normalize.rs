//! Typography normalization for TTS input.

use once_cell::sync::Lazy;
use regex::Regex;

const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{2026}', "..."),
    ('\u{2014}', "-"),
    ('\u{2013}', "-"),
    ('\u{00A0}', " "),
];

static INLINE_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("valid inline space regex"));

// Lowercase letter + terminal punctuation glued to the next capital.
static GLUED_SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Ll}[.!?]+)(\p{Lu})").expect("valid glued sentence regex"));

/// Normalize quotes, dashes and spacing so TTS engines read text evenly.
///
/// Line breaks are kept so paragraph and line structure survive.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }

    let out = INLINE_SPACE_RE.replace_all(&out, " ");
    GLUED_SENTENCE_RE.replace_all(&out, "$1 $2").into_owned()
}
