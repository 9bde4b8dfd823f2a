//! Paragraph splitting and the character-based combination pre-pass.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator placed between paragraphs combined into one group.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid blank line regex"));

/// Split on runs of blank lines; paragraphs are trimmed and empty ones dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINES_RE.split(text).map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Non-empty, trimmed lines in order.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Combine consecutive paragraphs into groups of at most `char_budget`
/// characters, keeping the blank line between them.
///
/// A paragraph longer than the budget forms its own group; the token check
/// happens later.
pub fn combine_paragraphs_by_chars(text: &str, char_budget: usize) -> Vec<String> {
    let separator_chars = PARAGRAPH_SEPARATOR.len();
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for paragraph in split_paragraphs(text) {
        let paragraph_chars = paragraph.chars().count();

        if current.is_empty() {
            current.push_str(paragraph);
            current_chars = paragraph_chars;
        } else if current_chars + separator_chars + paragraph_chars <= char_budget {
            current.push_str(PARAGRAPH_SEPARATOR);
            current.push_str(paragraph);
            current_chars += separator_chars + paragraph_chars;
        } else {
            groups.push(std::mem::take(&mut current));
            current.push_str(paragraph);
            current_chars = paragraph_chars;
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_line_runs() {
        let text = "One.\n\n\n  \nTwo\nstill two.\r\n\r\nThree.";
        assert_eq!(split_paragraphs(text), vec!["One.", "Two\nstill two.", "Three."]);
    }

    #[test]
    fn whitespace_only_text_has_no_paragraphs() {
        assert!(split_paragraphs(" \n\n\t\n ").is_empty());
        assert!(combine_paragraphs_by_chars("\n\n\n", 100).is_empty());
    }

    #[test]
    fn short_paragraphs_are_combined() {
        let text = "Segment one.\n\nSegment two, short too.\n\nThis is a much longer third segment that will likely exceed the char_combination_limit if combined with the first two, or even stand alone if very long.";
        let groups = combine_paragraphs_by_chars(text, 100);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], "Segment one.\n\nSegment two, short too.");
        assert!(groups[1].starts_with("This is a much longer third segment"));
    }

    #[test]
    fn budget_includes_separator() {
        // 5 + 2 + 5 = 12 characters.
        assert_eq!(combine_paragraphs_by_chars("aaaaa\n\nbbbbb", 12), vec!["aaaaa\n\nbbbbb"]);
        assert_eq!(combine_paragraphs_by_chars("aaaaa\n\nbbbbb", 11), vec!["aaaaa", "bbbbb"]);
    }

    #[test]
    fn lines_are_trimmed_and_blank_ones_dropped() {
        assert_eq!(split_lines("  a  \n\n b\r\n   \nc"), vec!["a", "b", "c"]);
    }
}
