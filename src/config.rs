//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the source directory, which is in
//! turn overridden by `LAUNDRY_*` environment variables.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml      # Site config (optional)
//! ├── content.toml     # Page copy: services, pricing, FAQ… (optional)
//! └── assets/          # Copied verbatim to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [business]
//! name = "Laundry Modern"
//! whatsapp_number = "6281234567890"   # national form (0812…) is accepted too
//! country_code = "62"                 # replaces a leading trunk 0
//! instagram = "https://instagram.com/laundrymodern"
//!
//! [contact]
//! max_attempts = 3          # submissions per window
//! window_secs = 60
//! submit_delay_ms = 1500
//!
//! [colors.light]
//! primary = "#2563eb"
//!
//! [logging]
//! filter = "info"
//! json = false
//! dev = false
//! suppress = []             # substrings of log messages to drop
//! ```
//!
//! ## Environment Overrides
//!
//! Business details can be injected at deploy time without editing files:
//!
//! | Variable | Key |
//! |----------|-----|
//! | `LAUNDRY_BUSINESS_NAME` | `business.name` |
//! | `LAUNDRY_BUSINESS_ADDRESS` | `business.address` |
//! | `LAUNDRY_BUSINESS_PHONE` | `business.phone` |
//! | `LAUNDRY_BUSINESS_EMAIL` | `business.email` |
//! | `LAUNDRY_OPERATION_HOURS` | `business.hours` |
//! | `LAUNDRY_WHATSAPP_NUMBER` | `business.whatsapp_number` |
//! | `LAUNDRY_SITE_URL` | `business.site_url` |
//! | `LAUNDRY_INSTAGRAM_URL` | `business.instagram` |
//! | `LAUNDRY_FACEBOOK_URL` | `business.facebook` |
//! | `LAUNDRY_TIKTOK_URL` | `business.tiktok` |
//!
//! Values are opaque strings here; the sanitizer and URL guard check them at
//! the point of use.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business identity and contact channels.
    pub business: BusinessConfig,
    /// Contact form throttling and timing.
    pub contact: ContactConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Log filtering and output format.
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.business.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "business.name must not be empty".into(),
            ));
        }
        if self.business.country_code.is_empty()
            || !self.business.country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Validation(
                "business.country_code must be digits only".into(),
            ));
        }
        if self.contact.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "contact.max_attempts must be at least 1".into(),
            ));
        }
        if self.contact.window_secs == 0 {
            return Err(ConfigError::Validation(
                "contact.window_secs must be non-zero".into(),
            ));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(value) = scheme.values().find(|v| !is_css_color(v)) {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode} contains an invalid color value: {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Colors are inlined into a `<style>` element, so only characters that can
/// appear in a color value are accepted.
fn is_css_color(value: &str) -> bool {
    !value.trim().is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "#(),.% -/".contains(c))
}

/// Business identity. Every value is shown on the page or used to build links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusinessConfig {
    pub name: String,
    pub address: String,
    /// Display phone number (shown as a `tel:` link).
    pub phone: String,
    pub email: String,
    pub hours: String,
    /// Number the click-to-chat links point at.
    pub whatsapp_number: String,
    /// Country code that replaces a national trunk `0`.
    pub country_code: String,
    /// Canonical public URL of the site (used in structured data).
    pub site_url: String,
    /// Social profile links. Empty strings are omitted from the page.
    pub instagram: String,
    pub facebook: String,
    pub tiktok: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Laundry Modern".to_string(),
            address: "Jl. Contoh Alamat No. 123, Jakarta Selatan".to_string(),
            phone: "+62 812-3456-7890".to_string(),
            email: "info@laundrymodern.com".to_string(),
            hours: "Senin - Minggu: 07:00 - 20:00 WIB".to_string(),
            whatsapp_number: "6281234567890".to_string(),
            country_code: "62".to_string(),
            site_url: "https://laundrymodern.com".to_string(),
            instagram: "https://instagram.com/laundrymodern".to_string(),
            facebook: "https://facebook.com/laundrymodern".to_string(),
            tiktok: "https://tiktok.com/@laundrymodern".to_string(),
        }
    }
}

impl BusinessConfig {
    /// Non-empty social links as `(label, url)`, in display order.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Instagram", self.instagram.as_str()),
            ("Facebook", self.facebook.as_str()),
            ("TikTok", self.tiktok.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

/// Contact form throttling and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Submissions allowed per window.
    pub max_attempts: u32,
    /// Rate limit window length in seconds.
    pub window_secs: u64,
    /// Pause before the chat link is opened, in milliseconds.
    pub submit_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window_secs: 60,
            submit_delay_ms: 1500,
        }
    }
}

impl ContactConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// Log filtering and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Development mode: report suppressed messages once per run.
    pub dev: bool,
    /// Messages containing any of these substrings are dropped.
    pub suppress: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            dev: false,
            suppress: Vec::new(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Background color.
    pub background: String,
    /// Card and form surface color.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text color (descriptions, captions).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Brand color for buttons and highlights.
    pub primary: String,
    /// Second gradient stop next to `primary`.
    pub secondary: String,
}

impl ColorScheme {
    fn values(&self) -> impl Iterator<Item = &str> {
        [
            &self.background,
            &self.surface,
            &self.text,
            &self.text_muted,
            &self.border,
            &self.primary,
            &self.secondary,
        ]
        .into_iter()
        .map(String::as_str)
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f8fafc".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            primary: "#2563eb".to_string(),
            secondary: "#06b6d4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0e27".to_string(),
            surface: "#111736".to_string(),
            text: "#f1f5f9".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            primary: "#3b82f6".to_string(),
            secondary: "#22d3ee".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a TOML file from a directory as a raw value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_toml(dir: &Path, file_name: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Apply `LAUNDRY_*` overrides read through `lookup`.
///
/// Taking the lookup as a function keeps this testable without touching the
/// process environment.
pub fn apply_env_overrides(config: &mut SiteConfig, lookup: impl Fn(&str) -> Option<String>) {
    let business = &mut config.business;
    let fields: [(&str, &mut String); 10] = [
        ("LAUNDRY_BUSINESS_NAME", &mut business.name),
        ("LAUNDRY_BUSINESS_ADDRESS", &mut business.address),
        ("LAUNDRY_BUSINESS_PHONE", &mut business.phone),
        ("LAUNDRY_BUSINESS_EMAIL", &mut business.email),
        ("LAUNDRY_OPERATION_HOURS", &mut business.hours),
        ("LAUNDRY_WHATSAPP_NUMBER", &mut business.whatsapp_number),
        ("LAUNDRY_SITE_URL", &mut business.site_url),
        ("LAUNDRY_INSTAGRAM_URL", &mut business.instagram),
        ("LAUNDRY_FACEBOOK_URL", &mut business.facebook),
        ("LAUNDRY_TIKTOK_URL", &mut business.tiktok),
    ];
    for (var, field) in fields {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(var, "config override from environment");
            *field = value;
        }
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// applies `LAUNDRY_*` environment overrides and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_with(root, |var| std::env::var(var).ok())
}

/// [`load_config`] with overrides read through `lookup` instead of the
/// process environment.
pub fn load_config_with(
    root: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_toml(root, "config.toml")?;
    let mut config = resolve_config(base, overlay)?;
    apply_env_overrides(&mut config, lookup);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Laundry Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at content/config.toml. Unknown keys will cause an error.
# Business values can also be set with LAUNDRY_* environment variables,
# which take precedence over this file.

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
[business]
name = "Laundry Modern"
address = "Jl. Contoh Alamat No. 123, Jakarta Selatan"
phone = "+62 812-3456-7890"
email = "info@laundrymodern.com"
hours = "Senin - Minggu: 07:00 - 20:00 WIB"

# Number used by every click-to-chat link. National form (0812...) is
# accepted and rewritten with country_code.
whatsapp_number = "6281234567890"
country_code = "62"

# Canonical public URL, used in structured data.
site_url = "https://laundrymodern.com"

# Social profiles. Leave empty to hide. Only allow-listed hosts are linked.
instagram = "https://instagram.com/laundrymodern"
facebook = "https://facebook.com/laundrymodern"
tiktok = "https://tiktok.com/@laundrymodern"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Submissions allowed per window before the visitor has to wait.
max_attempts = 3
window_secs = 60

# Pause before the chat link opens, in milliseconds.
submit_delay_ms = 1500

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f8fafc"
text = "#0f172a"
text_muted = "#64748b"
border = "#e2e8f0"
primary = "#2563eb"
secondary = "#06b6d4"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0e27"
surface = "#111736"
text = "#f1f5f9"
text_muted = "#94a3b8"
border = "#1e293b"
primary = "#3b82f6"
secondary = "#22d3ee"

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# Filter directive used when RUST_LOG is not set.
filter = "info"

# Emit JSON lines instead of plain text.
json = false

# Development mode: summarize suppressed messages at the end of a run.
dev = false

# Log messages containing any of these substrings are dropped.
suppress = []
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-surface", &scheme.surface),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-primary", &scheme.primary),
        ("--color-secondary", &scheme.secondary),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_business() {
        let config = SiteConfig::default();
        assert_eq!(config.business.name, "Laundry Modern");
        assert_eq!(config.business.whatsapp_number, "6281234567890");
        assert_eq!(config.business.country_code, "62");
    }

    #[test]
    fn default_contact_limits() {
        let config = SiteConfig::default();
        assert_eq!(config.contact.max_attempts, 3);
        assert_eq!(config.contact.window(), Duration::from_secs(60));
        assert_eq!(config.contact.submit_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[business]
name = "Cuci Kilat"

[colors.light]
primary = "#ff0000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.business.name, "Cuci Kilat");
        assert_eq!(config.colors.light.primary, "#ff0000");
        // Defaults preserved
        assert_eq!(config.business.whatsapp_number, "6281234567890");
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0a0e27");
    }

    #[test]
    fn social_links_skip_empty() {
        let mut business = BusinessConfig::default();
        business.facebook = String::new();
        let labels: Vec<_> = business.social_links().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Instagram", "TikTok"]);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.primary = "#123456".to_string();
        colors.dark.primary = "#654321".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-primary: #123456;"));
        assert!(css.contains("--color-primary: #654321;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_with(tmp.path(), no_env).unwrap();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.contact.max_attempts, 3);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[contact]
max_attempts = 5
"#,
        )
        .unwrap();

        let config = load_config_with(tmp.path(), no_env).unwrap();
        assert_eq!(config.contact.max_attempts, 5);
        assert_eq!(config.contact.window_secs, 60);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config_with(tmp.path(), no_env);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[contact]
max_attempts = 0
"#,
        )
        .unwrap();
        let result = load_config_with(tmp.path(), no_env);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Environment overrides
    // =========================================================================

    #[test]
    fn load_config_applies_lookup_after_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[business]\nname = \"Dari File\"\nphone = \"021-555\"\n",
        )
        .unwrap();
        let config = load_config_with(tmp.path(), |var| {
            (var == "LAUNDRY_BUSINESS_NAME").then(|| "Dari Env".to_string())
        })
        .unwrap();
        assert_eq!(config.business.name, "Dari Env");
        assert_eq!(config.business.phone, "021-555");
    }

    #[test]
    fn env_overrides_replace_business_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LAUNDRY_WHATSAPP_NUMBER", "081298765432"),
            ("LAUNDRY_BUSINESS_NAME", "Cuci Kilat"),
            ("LAUNDRY_TIKTOK_URL", "   "),
        ]);
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.business.whatsapp_number, "081298765432");
        assert_eq!(config.business.name, "Cuci Kilat");
        // Blank values are ignored
        assert_eq!(config.business.tiktok, "https://tiktok.com/@laundrymodern");
    }

    #[test]
    fn env_overrides_noop_without_vars() {
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.business.name, "Laundry Modern");
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[contact]
max_attempts = 3
window_secs = 60
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[contact]
window_secs = 120
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let contact = merged.get("contact").unwrap();
        assert_eq!(contact.get("window_secs").unwrap().as_integer(), Some(120));
        assert_eq!(contact.get("max_attempts").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"suppress = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"suppress = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("suppress").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection and validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[business]
nmae = "typo"
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[images]\nquality = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_country_code() {
        let mut config = SiteConfig::default();
        config.business.country_code = "+62".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_window() {
        let mut config = SiteConfig::default();
        config.contact.window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_markup_in_colors() {
        let mut config = SiteConfig::default();
        config.colors.dark.primary = "red}</style><script>".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.colors.dark.primary = "rgb(10, 20, 30)".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.business.name, defaults.business.name);
        assert_eq!(config.business.tiktok, defaults.business.tiktok);
        assert_eq!(config.contact.submit_delay_ms, defaults.contact.submit_delay_ms);
        assert_eq!(config.colors.dark.surface, defaults.colors.dark.surface);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[business]", "[contact]", "[colors.light]", "[colors.dark]", "[logging]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for section in ["business", "contact", "colors", "logging"] {
            assert!(val.get(section).is_some(), "missing {section}");
        }
    }
}
