//! Small persisted key/value state and fail-closed JSON helpers.
//!
//! The CLI keeps exactly one persisted flag (the dismissed developer notice)
//! in a JSON file. Reads never fail loudly: a missing or corrupt file is an
//! empty store, and a value that looks like injected script is discarded.

use super::escape::strip_html_tags;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key for the dismissed developer notice.
pub const DEV_NOTICE_DISMISSED_KEY: &str = "dev-notice-dismissed";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse `json`, returning `fallback` on empty or malformed input.
pub fn safe_json_parse<T: DeserializeOwned>(json: &str, fallback: T) -> T {
    if json.trim().is_empty() {
        return fallback;
    }
    match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "JSON parse error");
            fallback
        }
    }
}

/// File-backed string store.
#[derive(Debug)]
pub struct SecureStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl SecureStore {
    /// Open the store at `path`. Missing or unreadable files yield an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .map(|content| safe_json_parse(&content, BTreeMap::new()))
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value for `key`, dropping it if it contains script-like content.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let suspicious = self
            .values
            .get(key)
            .is_some_and(|v| v.contains("<script") || v.contains("javascript:"));
        if suspicious {
            tracing::warn!(key, "discarding suspicious stored value");
            self.values.remove(key);
            if let Err(e) = self.save() {
                tracing::error!(key, error = %e, "failed to persist removal of stored value");
            }
            return None;
        }
        self.values.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Store `value` with markup stripped and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), strip_html_tags(value));
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        self.save()
    }

    /// True when the stored value for `key` is `"true"`.
    pub fn flag(&mut self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
