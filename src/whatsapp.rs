//! Click-to-chat link construction.
//!
//! Links have the shape `https://wa.me/<digits>?text=<percent-encoded text>`.
//! The business number comes from config and is normalized the same way
//! visitor numbers are; the text is stripped of markup, embedded URLs that
//! fail the guard are replaced with `[URL REMOVED]`, and the result is capped
//! at 1000 characters before encoding. The finished link goes through the URL
//! guard once more before anyone may open it.

use crate::security::escape::strip_html_tags;
use crate::security::sanitize::truncate_chars;
use crate::security::url_guard::sanitize_url;
use crate::security::validate::normalize_phone_number;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Message used when no custom text is given.
pub const DEFAULT_MESSAGE: &str = "Halo 👋 Saya ingin pesan layanan laundry. Bisa bantu?";

pub const MAX_MESSAGE_LEN: usize = 1000;
pub const MAX_ITEM_NAME_LEN: usize = 100;
pub const URL_REMOVED: &str = "[URL REMOVED]";

static MESSAGE_XSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:|data:|<script").expect("valid regex"));
static EMBEDDED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("WhatsApp number is missing or invalid")]
    Misconfigured,
    #[error("link rejected by URL guard")]
    Rejected,
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not open link: {0}")]
pub struct NavigationError(pub String);

/// How a link is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Open in a new browsing context instead of replacing the page.
    pub new_context: bool,
    /// The opened page gets no handle back to the opener.
    pub no_opener: bool,
    /// No `Referer` is sent.
    pub no_referrer: bool,
}

impl OpenOptions {
    /// New context, no opener, no referrer.
    pub const ISOLATED: Self = Self {
        new_context: true,
        no_opener: true,
        no_referrer: true,
    };

    /// The `rel` attribute matching these options.
    pub fn rel(&self) -> &'static str {
        match (self.no_opener, self.no_referrer) {
            (true, true) => "noopener noreferrer",
            (true, false) => "noopener",
            (false, true) => "noreferrer",
            (false, false) => "",
        }
    }
}

/// The navigation primitive the link layer hands finished URLs to.
pub trait Navigator {
    fn open(&self, url: &str, options: OpenOptions) -> Result<(), NavigationError>;
}

/// Clean a chat message and percent-encode it for the `text=` parameter.
pub fn sanitize_whatsapp_message(message: &str) -> String {
    if message.is_empty() {
        return String::new();
    }

    let stripped = strip_html_tags(message);
    let without_vectors = remove_repeatedly(&MESSAGE_XSS, &stripped);
    let with_checked_urls = EMBEDDED_URL.replace_all(&without_vectors, |caps: &regex::Captures| {
        let url = &caps[0];
        if sanitize_url(url).is_some() {
            url.to_string()
        } else {
            URL_REMOVED.to_string()
        }
    });

    let text = if with_checked_urls.chars().count() > MAX_MESSAGE_LEN {
        format!("{}...", truncate_chars(&with_checked_urls, MAX_MESSAGE_LEN))
    } else {
        with_checked_urls.into_owned()
    };

    urlencoding::encode(&text).into_owned()
}

fn remove_repeatedly(re: &Regex, input: &str) -> String {
    let mut current = input.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, "").into_owned();
    }
    current
}

/// Builds click-to-chat links for one configured business number.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    phone: Option<String>,
    default_message: String,
}

impl LinkBuilder {
    /// `whatsapp_number` may be in national or international form; an invalid
    /// number is kept as "not configured" and every link request fails.
    pub fn new(whatsapp_number: &str, country_code: &str) -> Self {
        let phone = normalize_phone_number(whatsapp_number, country_code);
        if phone.is_none() {
            tracing::error!("WhatsApp number is not configured or invalid");
        }
        Self {
            phone,
            default_message: DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = message.into();
        self
    }

    /// The normalized business number, if valid.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Link with `custom_message`, or the default message when absent or blank.
    pub fn generate_link(&self, custom_message: Option<&str>) -> Result<String, LinkError> {
        let Some(phone) = self.phone.as_deref() else {
            tracing::error!("cannot build WhatsApp link: phone number not configured");
            return Err(LinkError::Misconfigured);
        };

        let text = match custom_message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => sanitize_whatsapp_message(message),
            None => sanitize_whatsapp_message(&self.default_message),
        };

        let link = format!("{WHATSAPP_BASE_URL}/{phone}?text={text}");
        sanitize_url(&link).ok_or_else(|| {
            tracing::error!("generated WhatsApp link rejected by URL guard");
            LinkError::Rejected
        })
    }

    /// Link asking to order the named service.
    pub fn service_link(&self, service_name: &str) -> Result<String, LinkError> {
        let name = item_name(service_name);
        self.generate_link(Some(&format!(
            "Halo 👋 Saya ingin pesan layanan \"{name}\". Bisa bantu?"
        )))
    }

    /// Link asking about the named pricing plan.
    pub fn pricing_link(&self, plan_name: &str) -> Result<String, LinkError> {
        let name = item_name(plan_name);
        self.generate_link(Some(&format!(
            "Halo 👋 Saya tertarik dengan paket \"{name}\". Bisa informasi lebih detail?"
        )))
    }
}

fn item_name(name: &str) -> &str {
    truncate_chars(name, MAX_ITEM_NAME_LEN).trim()
}

/// Re-check `url` and open it isolated from this page.
pub fn open_whatsapp(url: &str, navigator: &dyn Navigator) -> Result<(), LinkError> {
    let Some(safe) = sanitize_url(url) else {
        tracing::error!("refusing to open link rejected by URL guard");
        return Err(LinkError::Rejected);
    };
    navigator.open(&safe, OpenOptions::ISOLATED).map_err(|e| {
        tracing::error!(error = %e, "error opening WhatsApp link");
        LinkError::from(e)
    })
}
