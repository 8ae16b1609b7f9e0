//! Post-processing of free-form backend text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Line boundaries recognised when splitting backend output; `\r\n` yields an
/// empty piece that is skipped like any blank line.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*[:.)\-]?\s*").expect("valid regex"));

/// Remove an echoed prompt from the front of completion output.
pub fn strip_prompt_prefix<'a>(text: &'a str, prompt: &str) -> &'a str {
    text.strip_prefix(prompt).unwrap_or(text).trim()
}

/// Extract up to `k` distinct questions from `raw`, in first-seen order.
///
/// Numbered lines are taken first with their `1.` / `2)` / `3 -` prefixes
/// removed. If that leaves slots open and the text contains `?`, the whole
/// text is re-split on `?` and unseen fragments fill the remainder.
pub fn parse_questions(raw: &str, k: usize) -> Vec<String> {
    let mut questions: Vec<String> = Vec::with_capacity(k);
    if k == 0 {
        return questions;
    }

    for line in raw.split(LINE_BREAKS).map(str::trim).filter(|l| !l.is_empty()) {
        let stripped = NUMBERING.replace(line, "");
        if !stripped.is_empty() && !questions.iter().any(|q| q == stripped.as_ref()) {
            questions.push(stripped.into_owned());
        }
        if questions.len() == k {
            return questions;
        }
    }

    if raw.contains('?') {
        for fragment in raw.split('?').map(str::trim).filter(|f| !f.is_empty()) {
            let candidate = format!("{fragment}?");
            if !questions.contains(&candidate) {
                questions.push(candidate);
            }
            if questions.len() == k {
                break;
            }
        }
    }

    questions.truncate(k);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_variants_are_stripped() {
        let raw = "1: One?\n2) Two?\n 3 - Three?\n4Four?\n5.   Five?";
        assert_eq!(
            parse_questions(raw, 5),
            vec!["One?", "Two?", "Three?", "Four?", "Five?"]
        );
    }

    #[test]
    fn bare_number_line_is_dropped() {
        assert_eq!(
            parse_questions("1.\nDiscuss the ending", 2),
            vec!["Discuss the ending"]
        );
    }

    #[test]
    fn carriage_returns_and_unicode_separators_break_lines() {
        assert_eq!(
            parse_questions("1. What?\r2. Why?\r3. How?", 3),
            vec!["What?", "Why?", "How?"]
        );
        assert_eq!(
            parse_questions("1. What?\r\n2. Why?\u{2028}3. How?\u{85}4. Who?", 4),
            vec!["What?", "Why?", "How?", "Who?"]
        );
    }

    #[test]
    fn zero_requested_returns_nothing() {
        assert!(parse_questions("1. What?", 0).is_empty());
    }

    #[test]
    fn prompt_echo_is_removed() {
        assert_eq!(strip_prompt_prefix("Ask: hello ", "Ask:"), "hello");
        assert_eq!(strip_prompt_prefix(" other ", "Ask:"), "other");
    }
}
