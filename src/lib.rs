//! # Laundry Site
//!
//! A static site generator for a laundry shop's single-page landing site. The
//! page sells services and plans; every call to action hands the visitor to
//! WhatsApp with a prefilled message.
//!
//! # Architecture: Sanitize, Build, Hand Off
//!
//! The only data that ever leaves the page is a click-to-chat URL. Everything
//! is organized around producing that URL safely:
//!
//! ```text
//! config.toml + content.toml ─▶ LinkBuilder ─▶ URL guard ─▶ index.html (static links)
//! visitor input ─▶ sanitize ─▶ validate ─▶ rate limit ─▶ LinkBuilder ─▶ URL guard ─▶ Navigator
//! ```
//!
//! Static buttons (services, plans, hero, footer) get their links at build
//! time. The contact form runs the second path, in the browser through
//! `static/contact.js` and in Rust through [`contact::ContactSubmitter`],
//! which the `contact` CLI command drives.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`security`] | Escaping, validation, sanitizing, URL allow-list, rate limiting, persisted flags |
//! | [`whatsapp`] | Click-to-chat link construction and the [`whatsapp::Navigator`] seam |
//! | [`contact`] | Contact form state, validation messages, and the submit flow |
//! | [`config`] | `config.toml` loading, env overrides, validation, CSS color generation |
//! | [`content`] | Page copy with stock Indonesian content and `content.toml` overlay |
//! | [`schema`] | schema.org JSON-LD for the page head |
//! | [`generate`] | Renders `index.html` and `_headers` with Maud, copies assets |
//! | [`logging`] | `tracing` subscriber setup with pattern-based suppression |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Rejection Is a Type, Not an Empty String
//!
//! A URL that fails the guard is `None`; a link that cannot be built is a
//! [`whatsapp::LinkError`]. Callers cannot accidentally navigate to a
//! rejected value, and the "do nothing" path is visible at every call site.
//!
//! ## Hash-Pinned Inline Script
//!
//! The page inlines one stylesheet and one script. The generated `_headers`
//! CSP lists their SHA-256 hashes, so the policy needs neither
//! `'unsafe-inline'` nor per-request nonces and works on any static host.
//!
//! ## Injectable State
//!
//! The rate limiter owns its map and its clock; the navigator is a trait
//! object. Tests build independent limiters with a [`security::ManualClock`]
//! and record navigations instead of opening a browser.

pub mod config;
pub mod contact;
pub mod content;
pub mod generate;
pub mod logging;
pub mod output;
pub mod schema;
pub mod security;
pub mod whatsapp;

#[cfg(test)]
pub(crate) mod test_helpers;
