//! Shared test utilities for the laundry-site test suite.
//!
//! Provides a recording [`Navigator`], a throwaway source directory, and small
//! extractors for inspecting generated links and HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let nav = RecordingNavigator::default();
//! open_whatsapp(&link, &nav).unwrap();
//! assert_eq!(nav.opened().len(), 1);
//! assert_eq!(chat_text(&nav.opened()[0].0), "Halo");
//! ```

use crate::whatsapp::{NavigationError, Navigator, OpenOptions};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

// =========================================================================
// Navigation
// =========================================================================

/// Navigator that records every open request, optionally failing all of them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    opened: RefCell<Vec<(String, OpenOptions)>>,
    failure: Option<String>,
}

impl RecordingNavigator {
    /// A navigator whose every `open` fails with `message`. Nothing is recorded.
    pub fn failing(message: &str) -> Self {
        Self {
            opened: RefCell::default(),
            failure: Some(message.to_string()),
        }
    }

    /// URLs opened so far, with their options, in call order.
    pub fn opened(&self) -> Vec<(String, OpenOptions)> {
        self.opened.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, url: &str, options: OpenOptions) -> Result<(), NavigationError> {
        if let Some(message) = &self.failure {
            return Err(NavigationError(message.clone()));
        }
        self.opened.borrow_mut().push((url.to_string(), options));
        Ok(())
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Source directory with two asset files:
///
/// ```text
/// assets/
/// ├── logo.svg
/// └── img/shop.jpg
/// ```
pub fn fixture_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let assets = tmp.path().join("assets");
    fs::create_dir_all(assets.join("img")).unwrap();
    fs::write(assets.join("logo.svg"), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
    fs::write(assets.join("img/shop.jpg"), [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
    tmp
}

// =========================================================================
// Extractors
// =========================================================================

/// Decoded `text` query parameter of a chat link. Panics if absent.
pub fn chat_text(link: &str) -> String {
    let parsed = url::Url::parse(link).unwrap_or_else(|e| panic!("not a URL: {link} ({e})"));
    parsed
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| panic!("no text parameter in {link}"))
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
