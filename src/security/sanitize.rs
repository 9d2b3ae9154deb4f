//! Bounded cleanup of raw field input.
//!
//! [`sanitize_text_input`] runs on every keystroke and again on submit, so its
//! output must be a fixed point: sanitizing an already-sanitized value returns
//! it unchanged.

use super::escape::strip_html_tags;
use super::validate::{DEFAULT_COUNTRY_CODE, normalize_phone_number};
use regex::Regex;
use std::sync::LazyLock;

static NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Per-field length limits used by the contact form.
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 254;
pub const MESSAGE_MAX_LEN: usize = 1000;

/// Clean free text: drop control characters, strip markup, optionally fold
/// line breaks into single spaces, cap at `max_len` characters, trim.
///
/// Control characters (C0 except tab/LF/CR, plus DEL) go first. Removing them
/// after stripping could glue a split `java\u{1}script:` back together.
pub fn sanitize_text_input(input: &str, max_len: usize, allow_newlines: bool) -> String {
    if input.is_empty() {
        return String::new();
    }

    let without_controls: String = input.chars().filter(|c| !is_stripped_control(*c)).collect();
    let mut sanitized = strip_html_tags(&without_controls);

    if !allow_newlines {
        sanitized = NEWLINES.replace_all(&sanitized, " ").into_owned();
    }

    truncate_chars(&sanitized, max_len).trim().to_string()
}

/// Digits-only international phone number, or `None` if it does not validate.
pub fn sanitize_phone_number(phone: &str) -> Option<String> {
    normalize_phone_number(phone, DEFAULT_COUNTRY_CODE)
}

/// First `max` characters of `s` (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup() {
        assert_eq!(
            sanitize_text_input("<b>Budi</b><script>x()</script>", 100, false),
            "Budi"
        );
    }

    #[test]
    fn folds_newlines_when_disallowed() {
        assert_eq!(sanitize_text_input("Budi\r\n\nSantoso", 100, false), "Budi Santoso");
    }

    #[test]
    fn keeps_newlines_when_allowed() {
        assert_eq!(sanitize_text_input("baris 1\nbaris 2", 100, true), "baris 1\nbaris 2");
    }

    #[test]
    fn removes_control_characters_but_keeps_tab() {
        assert_eq!(sanitize_text_input("a\u{0}b\u{7}c\td\u{7F}", 100, true), "abc\td");
    }

    #[test]
    fn control_characters_cannot_hide_a_scheme() {
        assert_eq!(sanitize_text_input("java\u{1}script:alert(1)", 100, true), "alert(1)");
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(sanitize_text_input("ééééé", 3, false), "ééé");
        assert_eq!(sanitize_text_input("abcdef", 4, false), "abcd");
    }

    #[test]
    fn trims_after_truncation() {
        assert_eq!(sanitize_text_input("abc def", 4, false), "abc");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize_text_input("", 10, true), "");
    }

    #[test]
    fn sanitized_output_is_a_fixed_point() {
        let inputs = [
            "  Halo <b>kak</b>\n\nSaya mau tanya  ",
            "javajavascript:script:x onclick='y' z",
            "<scr<b>ipt>alert(1)</script> sisa",
            "ononclick=\"a\"click=\"b\" ok",
            "a\u{1}\u{2}b\r\nc",
            "Saya ingin bertanya soal harga",
        ];
        for input in inputs {
            for allow_newlines in [true, false] {
                let once = sanitize_text_input(input, 20, allow_newlines);
                let twice = sanitize_text_input(&once, 20, allow_newlines);
                assert_eq!(once, twice, "not stable for {input:?}");
            }
        }
    }

    #[test]
    fn phone_is_digits_only() {
        assert_eq!(sanitize_phone_number("+62 812-3456-7890").as_deref(), Some("6281234567890"));
        assert_eq!(sanitize_phone_number("0812 3456 7890").as_deref(), Some("6281234567890"));
        assert_eq!(sanitize_phone_number("12"), None);
    }

    #[test]
    fn truncate_chars_shorter_than_limit() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
