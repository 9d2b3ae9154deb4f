//! The contact form flow.
//!
//! ```text
//! set_field (per keystroke) ─▶ validate ─▶ rate limit ─▶ delay ─▶ compose ─▶ link ─▶ open
//! ```
//!
//! Every step that can stop a submission does so with a [`SubmitOutcome`]
//! value; nothing here panics or returns an error type to the caller. Each
//! outcome carries the [`Notice`] shown to the visitor.

use crate::config::ContactConfig;
use crate::security::rate_limit::{Clock, RateLimitDecision, RateLimiter, SystemClock};
use crate::security::sanitize::{
    EMAIL_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN, sanitize_text_input,
};
use crate::security::validate::{
    DEFAULT_COUNTRY_CODE, normalize_phone_number, validate_email, validate_name,
};
use crate::whatsapp::{LinkBuilder, LinkError, Navigator, open_whatsapp};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Rate limiter key for contact submissions.
pub const RATE_LIMIT_KEY: &str = "contact-form";

/// Messages shorter than this many characters are rejected.
pub const MIN_MESSAGE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Phone, Field::Email, Field::Message];

    /// Form key, also used as the HTML input name.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-level validation message shown next to the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Nama wajib diisi")]
    NameRequired,
    #[error("Nama hanya boleh berisi huruf, spasi, dan tanda hubung")]
    NameInvalid,
    #[error("Nomor telepon tidak valid")]
    PhoneInvalid,
    #[error("Email wajib diisi")]
    EmailRequired,
    #[error("Format email tidak valid")]
    EmailInvalid,
    #[error("Pesan wajib diisi")]
    MessageRequired,
    #[error("Pesan minimal 10 karakter")]
    MessageTooShort,
}

/// All field errors from one validation pass, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

/// Raw form state, cleaned on every update.
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    phone: String,
    email: String,
    message: String,
    country_code: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}

impl ContactForm {
    /// Empty form. `country_code` replaces a national trunk `0` in the phone.
    pub fn new(country_code: &str) -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            message: String::new(),
            country_code: country_code.to_string(),
        }
    }

    /// Store `raw` for `field` after the per-keystroke cleanup.
    ///
    /// The phone is kept as typed; it is normalized on validation.
    pub fn set_field(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => self.name = sanitize_text_input(raw, NAME_MAX_LEN, false),
            Field::Phone => self.phone = raw.to_string(),
            Field::Email => self.email = sanitize_text_input(raw, EMAIL_MAX_LEN, false),
            Field::Message => self.message = sanitize_text_input(raw, MESSAGE_MAX_LEN, true),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Re-sanitize every field and check it, collecting one error per field.
    pub fn validate(&self) -> Result<ContactDetails, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = sanitize_text_input(&self.name, NAME_MAX_LEN, false);
        if name.is_empty() {
            errors.insert(Field::Name, FieldError::NameRequired);
        } else if !validate_name(&name) {
            errors.insert(Field::Name, FieldError::NameInvalid);
        }

        let phone = normalize_phone_number(&self.phone, &self.country_code);
        if phone.is_none() {
            errors.insert(Field::Phone, FieldError::PhoneInvalid);
        }

        let email = sanitize_text_input(&self.email, EMAIL_MAX_LEN, false);
        if email.is_empty() {
            errors.insert(Field::Email, FieldError::EmailRequired);
        } else if !validate_email(&email) {
            errors.insert(Field::Email, FieldError::EmailInvalid);
        }

        let message = sanitize_text_input(&self.message, MESSAGE_MAX_LEN, true);
        if message.is_empty() {
            errors.insert(Field::Message, FieldError::MessageRequired);
        } else if message.chars().count() < MIN_MESSAGE_LEN {
            errors.insert(Field::Message, FieldError::MessageTooShort);
        }

        match phone {
            Some(phone) if errors.is_empty() => Ok(ContactDetails {
                name,
                phone,
                email,
                message,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated, sanitized submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    /// Digits only, international form.
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl ContactDetails {
    /// The chat text sent to the business.
    pub fn compose_message(&self) -> String {
        format!(
            "Halo! Saya ingin bertanya:\n\nNama: {}\nPhone: {}\nEmail: {}\n\nPesan:\n{}",
            self.name, self.phone, self.email, self.message
        )
    }
}

/// Throttling and timing for submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    pub max_attempts: u32,
    pub window: Duration,
    /// Pause between a passed rate check and opening the link.
    pub delay: Duration,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self::from(&ContactConfig::default())
    }
}

impl From<&ContactConfig> for SubmitPolicy {
    fn from(config: &ContactConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            window: config.window(),
            delay: config.submit_delay(),
        }
    }
}

/// User-visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    /// Rendered as an error.
    pub destructive: bool,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>, destructive: bool) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            destructive,
        }
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The link was opened; the form has been cleared.
    Sent { url: String },
    Invalid(FieldErrors),
    RateLimited { retry_after_secs: u64 },
    /// The business WhatsApp number is missing or invalid.
    Misconfigured,
    /// The link failed the URL guard. Details stay in the log.
    Blocked,
    NavigationFailed,
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::Sent { .. } => Notice::new(
                "Pesan Terkirim!",
                "Kami akan segera menghubungi Anda melalui WhatsApp.",
                false,
            ),
            Self::Invalid(_) => {
                Notice::new("Validasi Gagal", "Mohon perbaiki kesalahan pada form", true)
            }
            Self::RateLimited { retry_after_secs } => Notice::new(
                "Terlalu Banyak Percobaan",
                format!("Mohon tunggu {retry_after_secs} detik sebelum mengirim lagi"),
                true,
            ),
            Self::Misconfigured => Notice::new(
                "Error Konfigurasi",
                "Nomor WhatsApp tidak valid. Hubungi administrator.",
                true,
            ),
            Self::Blocked | Self::NavigationFailed => {
                Notice::new("Error", "Gagal membuka WhatsApp. Mohon coba lagi.", true)
            }
        }
    }
}

/// Runs submissions against one link builder and one rate limiter.
pub struct ContactSubmitter<C = SystemClock> {
    links: LinkBuilder,
    limiter: RateLimiter<C>,
    policy: SubmitPolicy,
}

impl ContactSubmitter<SystemClock> {
    pub fn new(links: LinkBuilder, policy: SubmitPolicy) -> Self {
        Self::with_limiter(links, policy, RateLimiter::new())
    }
}

impl<C: Clock> ContactSubmitter<C> {
    pub fn with_limiter(links: LinkBuilder, policy: SubmitPolicy, limiter: RateLimiter<C>) -> Self {
        Self {
            links,
            limiter,
            policy,
        }
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    /// Validate, throttle and hand the chat link to `navigator`.
    ///
    /// The navigator is called at most once. The form is cleared only when
    /// the link was opened.
    pub fn submit(&mut self, form: &mut ContactForm, navigator: &dyn Navigator) -> SubmitOutcome {
        let details = match form.validate() {
            Ok(details) => details,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "contact form rejected");
                return SubmitOutcome::Invalid(errors);
            }
        };

        let decision =
            self.limiter
                .check(RATE_LIMIT_KEY, self.policy.max_attempts, self.policy.window);
        if let RateLimitDecision::Denied { retry_after_secs } = decision {
            tracing::info!(retry_after_secs, "contact form rate limited");
            return SubmitOutcome::RateLimited { retry_after_secs };
        }

        if !self.policy.delay.is_zero() {
            std::thread::sleep(self.policy.delay);
        }

        let outcome = self
            .links
            .generate_link(Some(&details.compose_message()))
            .and_then(|url| open_whatsapp(&url, navigator).map(|()| url));

        match outcome {
            Ok(url) => {
                tracing::info!("contact message handed to WhatsApp");
                form.clear();
                SubmitOutcome::Sent { url }
            }
            Err(LinkError::Misconfigured) => SubmitOutcome::Misconfigured,
            Err(LinkError::Rejected) => SubmitOutcome::Blocked,
            Err(LinkError::Navigation(_)) => SubmitOutcome::NavigationFailed,
        }
    }
}
