//! Format predicates for contact fields.
//!
//! ## Phone numbers
//!
//! Click-to-chat links need the international form (`6281234567890`), but
//! visitors type the national one (`0812-3456-7890`). A single leading trunk
//! `0` followed by a non-zero digit is therefore rewritten to the country code
//! before the length and leading-digit rules are applied:
//!
//! | Input | Digits checked | Valid |
//! |-------|----------------|-------|
//! | `081234567890` | `6281234567890` | yes |
//! | `+62 812-3456-7890` | `6281234567890` | yes |
//! | `0012345678` | `0012345678` | no (international call prefix) |
//! | `0123` | `62123` | no (too short) |

use regex::Regex;
use std::sync::LazyLock;

/// Country code substituted for a national trunk prefix when none is configured.
pub const DEFAULT_COUNTRY_CODE: &str = "62";

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_EMAIL_LOCAL_LEN: usize = 64;

pub const MAX_NAME_LEN: usize = 100;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid regex")
});

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s'-]+$").expect("valid regex"));

/// True iff `email` matches the bounded `local@domain` pattern, is at most
/// 254 characters, and its local part is at most 64.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || !EMAIL.is_match(email) {
        return false;
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    let local = email.split('@').next().unwrap_or_default();
    local.chars().count() <= MAX_EMAIL_LOCAL_LEN
}

/// Normalize a phone number to international digits.
///
/// Non-digits are dropped, a national trunk `0` is replaced by
/// `country_code`, and the result must be 7–15 digits starting with 1–9.
pub fn normalize_phone_number(phone: &str, country_code: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let international = match digits.strip_prefix('0') {
        Some(rest) if rest.starts_with(|c: char| matches!(c, '1'..='9')) => {
            format!("{country_code}{rest}")
        }
        _ => digits,
    };

    let len = international.len();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&len) {
        return None;
    }
    if !international.starts_with(|c: char| matches!(c, '1'..='9')) {
        return None;
    }
    Some(international)
}

/// True iff `phone` normalizes to 7–15 digits with a leading 1–9.
pub fn validate_phone_number(phone: &str) -> bool {
    normalize_phone_number(phone, DEFAULT_COUNTRY_CODE).is_some()
}

/// True iff the trimmed name is 1–100 characters of letters, whitespace,
/// hyphens and apostrophes.
pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return false;
    }
    NAME.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Email
    // =========================================================================

    #[test]
    fn email_accepts_simple_address() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("budi@example.com"));
        assert!(validate_email("first.last+tag@mail.laundry.id"));
    }

    #[test]
    fn email_rejects_missing_at() {
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email(""));
    }

    #[test]
    fn email_rejects_long_local_part() {
        let email = format!("{}@b.co", "x".repeat(70));
        assert!(!validate_email(&email));
        let email = format!("{}@b.co", "x".repeat(64));
        assert!(validate_email(&email));
    }

    #[test]
    fn email_rejects_overlong_address() {
        let label = "a".repeat(60);
        let domain = [label.as_str(); 5].join(".");
        let email = format!("user@{domain}.com");
        assert!(email.len() > MAX_EMAIL_LEN);
        assert!(!validate_email(&email));
    }

    #[test]
    fn email_rejects_bad_domain_labels() {
        assert!(!validate_email("a@-b.co"));
        assert!(!validate_email("a@b..co"));
        assert!(!validate_email("a b@c.co"));
    }

    // =========================================================================
    // Phone
    // =========================================================================

    #[test]
    fn phone_accepts_international() {
        assert!(validate_phone_number("6281234567890"));
        assert!(validate_phone_number("+62 812-3456-7890"));
    }

    #[test]
    fn phone_accepts_national_trunk_prefix() {
        assert!(validate_phone_number("081234567890"));
        assert_eq!(
            normalize_phone_number("0812-3456-7890", "62").as_deref(),
            Some("6281234567890")
        );
    }

    #[test]
    fn phone_rejects_short() {
        assert!(!validate_phone_number("0123"));
        assert!(!validate_phone_number("123456"));
    }

    #[test]
    fn phone_rejects_double_zero_prefix() {
        assert!(!validate_phone_number("0012345678"));
    }

    #[test]
    fn phone_rejects_too_long() {
        assert!(!validate_phone_number("1234567890123456"));
        assert!(validate_phone_number("123456789012345"));
    }

    #[test]
    fn phone_rejects_empty_and_letters() {
        assert!(!validate_phone_number(""));
        assert!(!validate_phone_number("call me maybe"));
    }

    #[test]
    fn phone_uses_given_country_code() {
        assert_eq!(
            normalize_phone_number("0612345678", "31").as_deref(),
            Some("31612345678")
        );
    }

    // =========================================================================
    // Name
    // =========================================================================

    #[test]
    fn name_accepts_letters_and_punctuation() {
        assert!(validate_name("Budi"));
        assert!(validate_name("  Siti Nurhaliza "));
        assert!(validate_name("Jean-Luc O'Neil"));
        assert!(validate_name("Zoë Šimić"));
    }

    #[test]
    fn name_rejects_digits_and_symbols() {
        assert!(!validate_name("Budi123"));
        assert!(!validate_name("<b>Budi</b>"));
        assert!(!validate_name("budi@example.com"));
    }

    #[test]
    fn name_rejects_empty_and_too_long() {
        assert!(!validate_name("   "));
        assert!(!validate_name(&"a".repeat(101)));
        assert!(validate_name(&"a".repeat(100)));
    }
}
