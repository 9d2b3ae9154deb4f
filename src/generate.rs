//! HTML site generation.
//!
//! Renders the single marketing page from [`SiteConfig`] and [`SiteContent`]
//! and writes it with its companion files.
//!
//! ## Page Sections
//!
//! In document order: navbar, promo banner (optional), hero, services, why-us,
//! pricing, gallery, testimonials, FAQ, call to action, contact, footer, and
//! the floating chat button.
//!
//! Every click-to-chat `href` is built here, at build time, by the
//! [`LinkBuilder`] and rendered with `target="_blank" rel="noopener noreferrer"`.
//! A misconfigured WhatsApp number fails the build instead of shipping dead
//! buttons.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html     # The page
//! ├── _headers       # Security headers, CSP pinned to the inline script
//! └── ...            # Everything under <source>/assets/, copied verbatim
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/contact.js`: Client-side contact form flow
//!
//! Both are inlined. The CSP lists their SHA-256 hashes, so neither
//! `'unsafe-inline'` nor nonces are needed.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, BusinessConfig, SiteConfig};
use crate::content::{
    CallToAction, Faq, Feature, GalleryItem, Hero, NavLink, PricingPlan, PromoBanner, Service,
    SiteContent, Testimonial,
};
use crate::schema;
use crate::security::escape::escape_html;
use crate::security::sanitize::{EMAIL_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN};
use crate::security::url_guard::{ALLOWED_HOSTS, sanitize_url};
use crate::whatsapp::{LinkBuilder, LinkError, OpenOptions};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{CowStr, Event, LinkType, Parser, Tag, TagEnd, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("cannot build chat links: {0}")]
    Link(#[from] LinkError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/contact.js");

/// Directory under the source root copied verbatim into the output.
pub const ASSETS_DIR: &str = "assets";

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Bytes written to `index.html`.
    pub page_bytes: usize,
    /// Click-to-chat links rendered into the page.
    pub chat_links: usize,
    /// Files copied from the assets directory.
    pub assets_copied: usize,
    /// CSP source expression for the inline script.
    pub script_hash: String,
}

/// Every chat link the page needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ChatLinks {
    /// Normalized business number the links point at.
    pub phone: String,
    pub general: String,
    /// Same order as `content.services`.
    pub services: Vec<String>,
    /// Same order as `content.pricing`.
    pub plans: Vec<String>,
}

impl ChatLinks {
    pub fn resolve(builder: &LinkBuilder, content: &SiteContent) -> Result<Self, LinkError> {
        let general = builder.generate_link(None)?;
        let phone = builder.phone().ok_or(LinkError::Misconfigured)?.to_string();
        Ok(Self {
            phone,
            general,
            services: content
                .services
                .iter()
                .map(|s| builder.service_link(&s.title))
                .collect::<Result<_, _>>()?,
            plans: content
                .pricing
                .iter()
                .map(|p| builder.pricing_link(&p.name))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Number of distinct link placements on the page.
    fn count(&self) -> usize {
        // hero, cta, contact, footer and floating button all use `general`
        5 + self.services.len() + self.plans.len()
    }
}

/// `'sha256-…'` CSP source expression for an inline element body.
pub fn csp_hash(body: &str) -> String {
    format!("'sha256-{}'", BASE64.encode(Sha256::digest(body.as_bytes())))
}

/// Full stylesheet: config colors followed by the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

/// Render and write the site into `output_dir`.
pub fn generate(
    config: &SiteConfig,
    content: &SiteContent,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let builder = LinkBuilder::new(&config.business.whatsapp_number, &config.business.country_code);
    let links = ChatLinks::resolve(&builder, content)?;

    let css = stylesheet(config);
    fs::create_dir_all(output_dir)?;

    let page = render_page(config, content, &links, &css).into_string();
    fs::write(output_dir.join("index.html"), &page)?;
    tracing::debug!(bytes = page.len(), "generated index.html");

    let script_hash = csp_hash(JS);
    fs::write(
        output_dir.join("_headers"),
        render_headers(&script_hash, &csp_hash(&css)),
    )?;
    tracing::debug!("generated _headers");

    let assets_copied = copy_assets(&source_dir.join(ASSETS_DIR), output_dir)?;
    if assets_copied > 0 {
        tracing::debug!(files = assets_copied, "copied assets");
    }

    tracing::info!(output = %output_dir.display(), "site generated");
    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        page_bytes: page.len(),
        chat_links: links.count(),
        assets_copied,
        script_hash,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// `_headers` file applying to every path.
pub fn render_headers(script_hash: &str, style_hash: &str) -> String {
    let csp = [
        "default-src 'self'".to_string(),
        format!("script-src 'self' {script_hash}"),
        format!("style-src 'self' {style_hash}"),
        "img-src 'self' data: https: blob:".to_string(),
        "font-src 'self' data:".to_string(),
        "connect-src 'self' https://wa.me https://api.whatsapp.com".to_string(),
        "object-src 'none'".to_string(),
        "base-uri 'self'".to_string(),
        "form-action 'self' https://wa.me".to_string(),
        "frame-ancestors 'self'".to_string(),
        "upgrade-insecure-requests".to_string(),
    ]
    .join("; ");

    let headers = [
        ("X-DNS-Prefetch-Control", "on".to_string()),
        (
            "Strict-Transport-Security",
            "max-age=63072000; includeSubDomains; preload".to_string(),
        ),
        ("X-Frame-Options", "SAMEORIGIN".to_string()),
        ("X-Content-Type-Options", "nosniff".to_string()),
        ("Referrer-Policy", "strict-origin-when-cross-origin".to_string()),
        (
            "Permissions-Policy",
            "camera=(), microphone=(), geolocation=(), interest-cohort=()".to_string(),
        ),
        ("Content-Security-Policy", csp),
    ];

    let mut out = String::from("/*\n");
    for (name, value) in headers {
        out.push_str(&format!("  {name}: {value}\n"));
    }
    out
}

/// Client config for `contact.js`, as an inert JSON data block.
fn contact_config_json(config: &SiteConfig, phone: &str) -> String {
    let value = serde_json::json!({
        "whatsappNumber": phone,
        "countryCode": config.business.country_code,
        "maxAttempts": config.contact.max_attempts,
        "windowMs": config.contact.window_secs * 1000,
        "submitDelayMs": config.contact.submit_delay_ms,
        "allowedHosts": ALLOWED_HOSTS,
    });
    schema::to_script_json(&value)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, css: &str, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="id" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                meta property="og:title" content=(title);
                meta property="og:description" content=(description);
                meta property="og:type" content="website";
                meta property="og:locale" content="id_ID";
                title { (title) }
                style { (PreEscaped(css)) }
                (head)
            }
            body {
                (content)
            }
        }
    }
}

/// Anchor that opens in an isolated new context.
fn external_link(href: &str, class: &str, label: Markup) -> Markup {
    html! {
        a class=(class) href=(href) target="_blank" rel=(OpenOptions::ISOLATED.rel()) {
            (label)
        }
    }
}

fn json_ld(value: &serde_json::Value) -> Markup {
    html! {
        script type="application/ld+json" { (PreEscaped(schema::to_script_json(value))) }
    }
}

/// Markdown to HTML with raw HTML passed through as text.
///
/// Link destinations go through the URL guard. Rejected links keep their
/// text and lose the anchor; absolute links open in an isolated context.
pub fn render_markdown(source: &str) -> String {
    let mut dropped_link = false;
    let parser = Parser::new(source).filter_map(move |event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { dest_url, .. }) => match sanitize_url(&dest_url) {
            Some(url) if url.starts_with('/') => Some(Event::Start(Tag::Link {
                link_type: LinkType::Inline,
                dest_url: CowStr::from(url),
                title: CowStr::from(""),
                id: CowStr::from(""),
            })),
            Some(url) => Some(Event::Html(CowStr::from(format!(
                r#"<a href="{}" target="_blank" rel="{}">"#,
                escape_html(&url),
                OpenOptions::ISOLATED.rel()
            )))),
            None => {
                dropped_link = true;
                None
            }
        },
        Event::End(TagEnd::Link) if dropped_link => {
            dropped_link = false;
            None
        }
        other => Some(other),
    });
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

pub fn render_navbar(business_name: &str, nav: &[NavLink]) -> Markup {
    html! {
        header.navbar {
            a.brand href="#home" { (business_name) }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            nav.nav-links {
                ul {
                    @for link in nav {
                        li { a href=(link.href) { (link.label) } }
                    }
                }
            }
        }
    }
}

pub fn render_promo(promo: &PromoBanner) -> Markup {
    html! {
        @if promo.active && !promo.message.trim().is_empty() {
            div.promo-banner role="note" {
                p { (promo.message) }
            }
        }
    }
}

pub fn render_hero(hero: &Hero, business_name: &str, link: &str) -> Markup {
    html! {
        section.hero id="home" {
            div.hero-text {
                h1 {
                    (hero.title) " "
                    span.highlight { (hero.highlight) }
                    (hero.title_suffix)
                }
                p.lead { (hero.subtitle) }
                div.hero-actions {
                    (external_link(link, "button primary", html! { "Pesan Sekarang via WhatsApp" }))
                    a.button.secondary href="#pricing" { "Lihat Harga" }
                }
                dl.stats {
                    @for stat in &hero.stats {
                        div.stat {
                            dt { (stat.value) }
                            dd { (stat.label) }
                        }
                    }
                }
            }
            img.hero-image src=(hero.image) alt={ (business_name) " - Layanan Cuci Profesional" } loading="lazy";
        }
    }
}

pub fn render_services(services: &[Service], links: &[String]) -> Markup {
    html! {
        section.services id="services" {
            h2 { "Layanan Kami" }
            div.card-grid {
                @for (service, link) in services.iter().zip(links) {
                    article.card id={ "service-" (service.id) } {
                        h3 { (service.title) }
                        p { (service.description) }
                        (external_link(link, "card-action", html! { "Pesan Sekarang" }))
                    }
                }
            }
        }
    }
}

pub fn render_why_us(features: &[Feature]) -> Markup {
    html! {
        section.why-us id="why-us" {
            h2 { "Kenapa Memilih Kami?" }
            div.card-grid {
                @for feature in features {
                    article.card {
                        h3 { (feature.title) }
                        p { (feature.description) }
                    }
                }
            }
        }
    }
}

pub fn render_pricing(plans: &[PricingPlan], links: &[String]) -> Markup {
    html! {
        section.pricing id="pricing" {
            h2 { "Paket Harga" }
            div.plan-grid {
                @for (plan, link) in plans.iter().zip(links) {
                    article.plan.highlighted[plan.highlighted] id={ "plan-" (plan.id) } {
                        @if plan.highlighted {
                            span.badge { "Paling Populer" }
                        }
                        h3 { (plan.name) }
                        p.price {
                            (plan.display_price())
                            span.period { " " (plan.period) }
                        }
                        ul.features {
                            @for feature in &plan.features {
                                li { (feature) }
                            }
                        }
                        (external_link(link, "button primary", html! { (plan.cta) }))
                    }
                }
            }
        }
    }
}

pub fn render_gallery(items: &[GalleryItem]) -> Markup {
    html! {
        section.gallery id="gallery" {
            h2 { "Galeri" }
            div.gallery-grid {
                @for item in items {
                    figure.gallery-item data-category=(item.category) {
                        img src=(item.image) alt=(item.title) loading="lazy";
                        figcaption {
                            strong { (item.title) }
                            span { (item.description) }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_testimonials(testimonials: &[Testimonial]) -> Markup {
    html! {
        section.testimonials id="testimonials" {
            h2 { "Apa Kata Pelanggan" }
            div.card-grid {
                @for t in testimonials {
                    blockquote.card {
                        p.rating aria-label={ (t.rating) " dari 5 bintang" } {
                            @for _ in 0..t.rating { "★" }
                        }
                        p { (t.comment) }
                        footer {
                            cite { (t.name) }
                            span.role { (t.role) }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_faq(faqs: &[Faq]) -> Markup {
    html! {
        section.faq id="faq" {
            h2 { "Pertanyaan Umum" }
            @for faq in faqs {
                details {
                    summary { (faq.question) }
                    div.answer { (PreEscaped(render_markdown(&faq.answer))) }
                }
            }
        }
    }
}

pub fn render_cta(cta: &CallToAction, link: &str) -> Markup {
    html! {
        section.cta id="cta" {
            h2 { (cta.title) }
            p { (cta.subtitle) }
            (external_link(link, "button primary", html! { "Pesan Sekarang via WhatsApp" }))
            dl.stats {
                @for item in &cta.highlights {
                    div.stat {
                        dt { (item.value) }
                        dd { (item.label) }
                    }
                }
            }
        }
    }
}

/// Social links that pass the URL guard.
fn safe_social_links(business: &BusinessConfig) -> Vec<(&'static str, String)> {
    business
        .social_links()
        .into_iter()
        .filter_map(|(label, url)| sanitize_url(url).map(|safe| (label, safe)))
        .collect()
}

pub fn render_contact(business: &BusinessConfig, link: &str) -> Markup {
    html! {
        section.contact id="contact" {
            h2 { "Hubungi Kami" }
            div.contact-grid {
                div.contact-info {
                    dl {
                        dt { "Alamat" }
                        dd { (business.address) }
                        dt { "Telepon" }
                        dd { a href={ "tel:" (tel_digits(&business.phone)) } { (business.phone) } }
                        dt { "Email" }
                        dd { a href={ "mailto:" (business.email) } { (business.email) } }
                        dt { "Jam Operasional" }
                        dd { (business.hours) }
                    }
                    ul.social {
                        @for (label, url) in safe_social_links(business) {
                            li { (external_link(&url, "social-link", html! { (label) })) }
                        }
                    }
                }
                form id="contact-form" novalidate {
                    (form_field("name", "Nama", "text", NAME_MAX_LEN))
                    (form_field("phone", "Nomor Telepon", "tel", 20))
                    (form_field("email", "Email", "email", EMAIL_MAX_LEN))
                    label for="contact-message" { "Pesan" }
                    textarea id="contact-message" name="message" rows="5" maxlength=(MESSAGE_MAX_LEN) required {}
                    p.field-error data-error-for="message" {}
                    button.button.primary type="submit" { "Kirim via WhatsApp" }
                    noscript {
                        p {
                            "Formulir membutuhkan JavaScript. "
                            (external_link(link, "", html! { "Chat langsung via WhatsApp" }))
                        }
                    }
                }
            }
            div id="toast" role="status" aria-live="polite" hidden {}
        }
    }
}

fn form_field(name: &str, label: &str, input_type: &str, max_len: usize) -> Markup {
    let id = format!("contact-{name}");
    html! {
        label for=(id) { (label) }
        input id=(id) name=(name) type=(input_type) maxlength=(max_len) required;
        p.field-error data-error-for=(name) {}
    }
}

fn tel_digits(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

pub fn render_footer(business: &BusinessConfig, nav: &[NavLink], link: &str) -> Markup {
    html! {
        footer.site-footer {
            div.footer-brand {
                strong { (business.name) }
                p { "Layanan laundry profesional dengan teknologi modern untuk kepuasan Anda." }
            }
            nav.footer-links {
                h3 { "Quick Links" }
                ul {
                    @for l in nav {
                        li { a href=(l.href) { (l.label) } }
                    }
                }
            }
            div.footer-contact {
                h3 { "Jam Operasional" }
                p { (business.hours) }
                (external_link(link, "button secondary", html! { "Chat dengan Kami" }))
            }
        }
    }
}

pub fn render_floating_chat(business_name: &str, link: &str) -> Markup {
    html! {
        aside.floating-chat aria-label="Chat dengan Kami" {
            (external_link(link, "floating-chat-button", html! {
                span.sr-only { "Chat dengan " (business_name) }
                "💬"
            }))
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the complete page
pub fn render_page(config: &SiteConfig, content: &SiteContent, links: &ChatLinks, css: &str) -> Markup {
    let business = &config.business;

    let title = format!(
        "{} | Layanan Cuci {}{}",
        business.name, content.hero.highlight, content.hero.title_suffix
    );
    let description = format!("{} - {}", business.name, content.hero.subtitle);

    let head = html! {
        (json_ld(&schema::business_schema(business, content)))
        (json_ld(&schema::service_schema(business, content)))
        (json_ld(&schema::faq_schema(content)))
    };

    let body = html! {
        (render_navbar(&business.name, &content.nav))
        (render_promo(&content.promo))
        main {
            (render_hero(&content.hero, &business.name, &links.general))
            (render_services(&content.services, &links.services))
            (render_why_us(&content.why_us))
            (render_pricing(&content.pricing, &links.plans))
            (render_gallery(&content.gallery))
            (render_testimonials(&content.testimonials))
            (render_faq(&content.faqs))
            (render_cta(&content.cta, &links.general))
            (render_contact(business, &links.general))
        }
        (render_footer(business, &content.nav, &links.general))
        (render_floating_chat(&business.name, &links.general))
        script type="application/json" id="contact-config" {
            (PreEscaped(contact_config_json(config, &links.phone)))
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&title, &description, css, head, body)
}

// ============================================================================
// Tests
// ============================================================================
