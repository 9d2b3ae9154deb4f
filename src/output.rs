//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what the visitor will see (section titles, plan names,
//! notices) and shows links, hashes and paths as indented context lines.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Services
//! 001 Cuci Kering → chat link
//! Plans
//! 001 Paket Reguler (Rp 15.000 per kg) → chat link
//!
//! Generated index.html, _headers, 2 assets, 14 chat links
//!     Script CSP: 'sha256-…'
//! ```
//!
//! ## Check
//!
//! ```text
//! Business
//!     Name: Laundry Modern
//!     WhatsApp: 6281234567890
//! Social links
//!     Instagram: ok
//!     Facebook: rejected
//! Content
//! 001 Layanan (6 items)
//! …
//! All checks passed
//! ```
//!
//! ## Contact
//!
//! ```text
//! Pesan Terkirim!
//!     Kami akan segera menghubungi Anda melalui WhatsApp.
//!     Link: https://wa.me/…
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::contact::SubmitOutcome;
use crate::content::SiteContent;
use crate::generate::BuildReport;
use crate::security::url_guard::sanitize_url;
use crate::whatsapp::{LinkBuilder, OpenOptions};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Section header line: index + title + item count.
///
/// ```text
/// 001 Layanan (6 items)
/// ```
fn section_header(index: usize, title: &str, count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{} {} ({} {})", format_index(index), title, count, noun)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format build output: what the page links to and what was written.
pub fn format_build_output(report: &BuildReport, content: &SiteContent) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    if !content.services.is_empty() {
        lines.push("Services".to_string());
        for (i, service) in content.services.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} chat link",
                format_index(i + 1),
                service.title
            ));
        }
    }

    if !content.pricing.is_empty() {
        lines.push("Plans".to_string());
        for (i, plan) in content.pricing.iter().enumerate() {
            lines.push(format!(
                "{} {} ({} {}) \u{2192} chat link",
                format_index(i + 1),
                plan.name,
                plan.display_price(),
                plan.period
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated index.html, _headers, {} assets, {} chat links",
        report.assets_copied, report.chat_links
    ));
    lines.push(format!("{}Script CSP: {}", indent(1), report.script_hash));
    lines.push(format!("{}Output: {}", indent(1), report.output_dir.display()));
    lines
}

pub fn print_build_output(report: &BuildReport, content: &SiteContent) {
    print_lines(format_build_output(report, content));
}

// ============================================================================
// Check
// ============================================================================

/// Format a dry-run report of config and content.
///
/// The last line is `All checks passed` or `N problem(s) found`.
pub fn format_check_output(config: &SiteConfig, content: &SiteContent) -> Vec<String> {
    let mut lines = Vec::new();
    let mut problems = 0;
    let business = &config.business;

    lines.push("Business".to_string());
    lines.push(format!("{}Name: {}", indent(1), business.name));
    let builder = LinkBuilder::new(&business.whatsapp_number, &business.country_code);
    match builder.phone() {
        Some(phone) => lines.push(format!("{}WhatsApp: {}", indent(1), phone)),
        None => {
            problems += 1;
            lines.push(format!(
                "{}WhatsApp: invalid ({:?})",
                indent(1),
                business.whatsapp_number
            ));
        }
    }

    let socials = business.social_links();
    if !socials.is_empty() {
        lines.push("Social links".to_string());
        for (label, url) in socials {
            let status = if sanitize_url(url).is_some() {
                "ok"
            } else {
                problems += 1;
                "rejected"
            };
            lines.push(format!("{}{}: {}", indent(1), label, status));
        }
    }

    lines.push("Content".to_string());
    let sections = [
        ("Layanan", content.services.len()),
        ("Kenapa Kami", content.why_us.len()),
        ("Harga", content.pricing.len()),
        ("Galeri", content.gallery.len()),
        ("Testimoni", content.testimonials.len()),
        ("FAQ", content.faqs.len()),
    ];
    for (i, (title, count)) in sections.iter().enumerate() {
        lines.push(section_header(i + 1, title, *count));
    }
    if content.promo.active {
        lines.push(format!("{}Promo: {}", indent(1), content.promo.message));
    }

    if problems == 0 {
        lines.push("All checks passed".to_string());
    } else {
        let noun = if problems == 1 { "problem" } else { "problems" };
        lines.push(format!("{} {} found", problems, noun));
    }
    lines
}

// ============================================================================
// Link and contact
// ============================================================================

/// Format an opened link with the isolation it was opened with.
pub fn format_open(url: &str, options: OpenOptions) -> Vec<String> {
    let context = if options.new_context { "new context" } else { "same context" };
    let rel = options.rel();
    let mut lines = vec![format!("Open {}", url)];
    if rel.is_empty() {
        lines.push(format!("{}{}", indent(1), context));
    } else {
        lines.push(format!("{}{}, {}", indent(1), context, rel));
    }
    lines
}

/// Format a contact submission result: notice, then details.
pub fn format_submit_outcome(outcome: &SubmitOutcome) -> Vec<String> {
    let notice = outcome.notice();
    let mut lines = vec![notice.title, format!("{}{}", indent(1), notice.description)];
    match outcome {
        SubmitOutcome::Sent { url } => lines.push(format!("{}Link: {}", indent(1), url)),
        SubmitOutcome::Invalid(errors) => {
            for (field, error) in errors.iter() {
                lines.push(format!("{}{}: {}", indent(1), field, error));
            }
        }
        _ => {}
    }
    lines
}

pub fn print_submit_outcome(outcome: &SubmitOutcome) {
    print_lines(format_submit_outcome(outcome));
}

/// Development notice shown when log messages were suppressed.
pub fn format_dev_notice(suppressed: usize) -> Vec<String> {
    let noun = if suppressed == 1 { "message was" } else { "messages were" };
    vec![
        "Development Notice".to_string(),
        format!(
            "{}{} log {} hidden by logging.suppress.",
            indent(1),
            suppressed,
            noun
        ),
        format!(
            "{}Run `laundry-site dismiss-notice` to stop showing this.",
            indent(1)
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactForm, Field};
    use std::path::PathBuf;

    fn report() -> BuildReport {
        BuildReport {
            output_dir: PathBuf::from("dist"),
            page_bytes: 1000,
            chat_links: 14,
            assets_copied: 2,
            script_hash: "'sha256-abc'".to_string(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn section_header_singular_and_plural() {
        assert_eq!(section_header(1, "FAQ", 1), "001 FAQ (1 item)");
        assert_eq!(section_header(2, "Harga", 3), "002 Harga (3 items)");
    }

    // =========================================================================
    // Build
    // =========================================================================

    #[test]
    fn build_output_lists_services_and_plans() {
        let lines = format_build_output(&report(), &SiteContent::default());
        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert!(lines.contains(&"001 Cuci Kering \u{2192} chat link".to_string()));
        assert!(lines.contains(&"002 Paket Express (Rp 25.000 per kg) \u{2192} chat link".to_string()));
        assert!(lines.contains(
            &"Generated index.html, _headers, 2 assets, 14 chat links".to_string()
        ));
        assert!(lines.contains(&"    Script CSP: 'sha256-abc'".to_string()));
    }

    #[test]
    fn build_output_skips_empty_sections() {
        let content = SiteContent {
            services: Vec::new(),
            pricing: Vec::new(),
            ..SiteContent::default()
        };
        let lines = format_build_output(&report(), &content);
        assert!(!lines.contains(&"Services".to_string()));
        assert!(!lines.contains(&"Plans".to_string()));
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_output_passes_for_defaults() {
        let lines = format_check_output(&SiteConfig::default(), &SiteContent::default());
        assert!(lines.contains(&"    WhatsApp: 6281234567890".to_string()));
        assert!(lines.contains(&"001 Layanan (6 items)".to_string()));
        assert_eq!(lines.last().unwrap(), "All checks passed");
    }

    #[test]
    fn check_output_counts_problems() {
        let mut config = SiteConfig::default();
        config.business.whatsapp_number = "abc".to_string();
        config.business.facebook = "https://evil.example".to_string();
        let lines = format_check_output(&config, &SiteContent::default());
        assert!(lines.contains(&"    Facebook: rejected".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("    WhatsApp: invalid")));
        assert_eq!(lines.last().unwrap(), "2 problems found");
    }

    // =========================================================================
    // Link and contact
    // =========================================================================

    #[test]
    fn open_shows_isolation() {
        let lines = format_open("https://wa.me/1", OpenOptions::ISOLATED);
        assert_eq!(lines, vec![
            "Open https://wa.me/1".to_string(),
            "    new context, noopener noreferrer".to_string(),
        ]);
    }

    #[test]
    fn invalid_outcome_lists_field_errors() {
        let mut form = ContactForm::default();
        form.set_field(Field::Name, "Budi");
        let errors = form.validate().unwrap_err();
        let lines = format_submit_outcome(&SubmitOutcome::Invalid(errors));
        assert_eq!(lines[0], "Validasi Gagal");
        assert!(lines.contains(&"    phone: Nomor telepon tidak valid".to_string()));
        assert!(lines.contains(&"    message: Pesan wajib diisi".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("    name:")));
    }

    #[test]
    fn sent_outcome_shows_link() {
        let lines = format_submit_outcome(&SubmitOutcome::Sent {
            url: "https://wa.me/1?text=x".to_string(),
        });
        assert_eq!(lines[0], "Pesan Terkirim!");
        assert_eq!(lines[2], "    Link: https://wa.me/1?text=x");
    }

    #[test]
    fn blocked_outcome_hides_details() {
        let lines = format_submit_outcome(&SubmitOutcome::Blocked);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "    Gagal membuka WhatsApp. Mohon coba lagi.");
    }

    #[test]
    fn dev_notice_counts() {
        assert_eq!(format_dev_notice(1)[1], "    1 log message was hidden by logging.suppress.");
        assert_eq!(format_dev_notice(3)[1], "    3 log messages were hidden by logging.suppress.");
    }
}
