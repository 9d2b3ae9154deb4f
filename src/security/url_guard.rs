//! Outbound URL guard.
//!
//! Every URL the site navigates to passes through [`sanitize_url`]. Absolute
//! URLs must be `http`/`https` and point at an allow-listed host (exact match
//! or a subdomain of one); path-relative URLs (`/...`) pass through unchanged.
//! Anything else is rejected with `None` and a log line. Rejection reasons
//! stay in the log and are never shown to visitors.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hosts the site is allowed to link out to. Subdomains match too, which
/// covers the `www.` variants.
pub const ALLOWED_HOSTS: &[&str] = &[
    "wa.me",
    "api.whatsapp.com",
    "instagram.com",
    "facebook.com",
    "tiktok.com",
    "github.com",
    "vercel.com",
];

static DANGEROUS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(javascript|data|vbscript|file):").expect("valid regex"));
static HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

/// Validate a candidate navigation target.
///
/// Returns the normalized absolute URL, the relative path unchanged, or
/// `None` when the URL must not be used.
pub fn sanitize_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    if DANGEROUS_SCHEME.is_match(trimmed) {
        tracing::warn!(url = trimmed, "blocked dangerous URL scheme");
        return None;
    }

    if HTTP_SCHEME.is_match(trimmed) {
        return check_absolute(trimmed);
    }

    if is_path_relative(trimmed) {
        return Some(trimmed.to_string());
    }

    tracing::warn!(url = trimmed, "blocked URL that is neither http(s) nor path-relative");
    None
}

/// True when `host` is an allow-listed domain or one of its subdomains.
pub fn is_allowed_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    ALLOWED_HOSTS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn check_absolute(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(url, error = %e, "invalid URL");
            return None;
        }
    };

    let Some(host) = parsed.host_str() else {
        tracing::warn!(url, "blocked URL without host");
        return None;
    };

    if !is_allowed_host(host) {
        tracing::warn!(host, "blocked URL to host outside the allow-list");
        return None;
    }

    Some(parsed.to_string())
}

/// `/path` is relative to the site; `//host` and `/\host` are not, browsers
/// resolve both against a new host.
fn is_path_relative(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}
