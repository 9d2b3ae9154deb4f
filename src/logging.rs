//! Logging setup.
//!
//! Installs a `tracing` subscriber built from the `[logging]` config section:
//!
//! | Layer | Source |
//! |-------|--------|
//! | `EnvFilter` | `RUST_LOG`, else `logging.filter` |
//! | [`SuppressLayer`] | `logging.suppress` substrings |
//! | fmt | plain or JSON (`logging.json`) |
//!
//! Suppressed events never reach the formatter. They are counted so that a
//! development run can report how many messages were hidden.

use crate::config::LoggingConfig;
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Shared count of suppressed events.
#[derive(Debug, Clone, Default)]
pub struct SuppressedCounter(Arc<AtomicUsize>);

impl SuppressedCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Drops events whose rendered fields contain any of the configured patterns.
#[derive(Debug, Clone, Default)]
pub struct SuppressLayer {
    patterns: Vec<String>,
    suppressed: SuppressedCounter,
}

impl SuppressLayer {
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            suppressed: SuppressedCounter::default(),
        }
    }

    pub fn counter(&self) -> SuppressedCounter {
        self.suppressed.clone()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

impl<S: Subscriber> Layer<S> for SuppressLayer {
    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let mut text = FieldText::default();
        event.record(&mut text);
        if self.matches(&text.0) {
            self.suppressed.bump();
            return false;
        }
        true
    }
}

/// Renders every field of an event into one string.
#[derive(Default)]
struct FieldText(String);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() != "message" {
            let _ = write!(self.0, "{}=", field.name());
        }
        self.0.push_str(value);
        self.0.push(' ');
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?} ");
        } else {
            let _ = write!(self.0, "{}={value:?} ", field.name());
        }
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &LoggingConfig) -> SuppressedCounter {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let suppress = SuppressLayer::new(config.suppress.iter().cloned());
    let counter = suppress.counter();

    if config.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(suppress)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(suppress)
            .with(fmt_layer)
            .init();
    }

    tracing::debug!(filter = %config.filter, json = config.json, "logging initialized");
    counter
}
