//! Markup neutralization.
//!
//! Two tools with different contracts:
//!
//! - [`escape_html`] keeps the text and makes it inert: every markup-significant
//!   character becomes an entity. Use it when the text is shown back verbatim.
//! - [`strip_html_tags`] drops markup altogether: script and style blocks
//!   (including their bodies), every remaining tag, `javascript:` schemes and
//!   inline `on*="..."` handlers. Use it on free text that will be forwarded
//!   somewhere else.
//!
//! Script and style blocks are removed before generic tags. Stripping tags
//! first would leave the bodies behind as plain text.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").expect("valid regex"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));
static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)on\w+\s*=\s*["'][^"']*["']"#).expect("valid regex")
});

/// Escape `& < > " ' /` as HTML entities.
///
/// Empty input yields an empty string.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove markup from `input` and trim the result.
///
/// Removal is repeated until nothing more matches, so nested payloads such as
/// `javajavascript:script:` cannot reassemble themselves after one pass.
pub fn strip_html_tags(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(input: &str) -> String {
    let s = SCRIPT_BLOCK.replace_all(input, "");
    let s = STYLE_BLOCK.replace_all(&s, "");
    let s = ANY_TAG.replace_all(&s, "");
    let s = JAVASCRIPT_SCHEME.replace_all(&s, "");
    let s = EVENT_HANDLER.replace_all(&s, "");
    s.trim().to_string()
}
