//! Input sanitization and outbound-link safety.
//!
//! Everything a visitor types passes through this module before it ends up in
//! a click-to-chat URL:
//!
//! ```text
//! keystroke ─▶ sanitize (per field) ─▶ validate ─▶ rate limit ─▶ link builder ─▶ url guard ─▶ navigate
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`escape`] | HTML escaping and tag stripping |
//! | [`validate`] | Email, phone and name predicates |
//! | [`sanitize`] | Bounded per-field cleanup built on the two above |
//! | [`url_guard`] | Scheme and host allow-list for navigation targets |
//! | [`rate_limit`] | Fixed-window limiter with an injectable clock |
//! | [`storage`] | Persisted flags and fail-closed JSON parsing |
//!
//! All functions here are pure except the limiter and the store, which own
//! their state explicitly.

pub mod escape;
pub mod rate_limit;
pub mod sanitize;
pub mod storage;
pub mod url_guard;
pub mod validate;

pub use escape::{escape_html, strip_html_tags};
pub use rate_limit::{Clock, ManualClock, RateLimitDecision, RateLimiter, SystemClock};
pub use sanitize::{sanitize_phone_number, sanitize_text_input};
pub use storage::{SecureStore, safe_json_parse};
pub use url_guard::{is_allowed_host, sanitize_url};
pub use validate::{normalize_phone_number, validate_email, validate_name, validate_phone_number};
