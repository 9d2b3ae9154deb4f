//! Page copy: everything the marketing page says that is not business config.
//!
//! The stock content is the shop's Indonesian copy. A `content.toml` in the
//! source directory is layered over it with the same rules as `config.toml`:
//! tables merge key by key, arrays replace wholesale. Overriding `services`
//! therefore means listing every service you want shown.
//!
//! ```toml
//! [promo]
//! active = true
//! message = "Diskon 20% untuk pelanggan baru!"
//!
//! [[faqs]]
//! question = "Apakah ada layanan kilat?"
//! answer = "Ada, **Express 3 Jam**."
//! ```
//!
//! FAQ answers are Markdown.

use crate::config::{load_raw_toml, merge_toml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

impl From<crate::config::ConfigError> for ContentError {
    fn from(e: crate::config::ConfigError) -> Self {
        use crate::config::ConfigError;
        match e {
            ConfigError::Io(e) => Self::Io(e),
            ConfigError::Toml(e) => Self::Toml(e),
            ConfigError::Validation(msg) => Self::Validation(msg),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteContent {
    pub nav: Vec<NavLink>,
    pub promo: PromoBanner,
    pub hero: Hero,
    pub services: Vec<Service>,
    pub why_us: Vec<Feature>,
    pub pricing: Vec<PricingPlan>,
    pub gallery: Vec<GalleryItem>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromoBanner {
    pub active: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hero {
    /// Headline before the highlighted phrase.
    pub title: String,
    pub highlight: String,
    /// Headline after the highlighted phrase.
    pub title_suffix: String,
    pub subtitle: String,
    pub image: String,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    /// Price in rupiah.
    pub price: u64,
    pub period: String,
    pub features: Vec<String>,
    pub cta: String,
    #[serde(default)]
    pub highlighted: bool,
}

impl PricingPlan {
    /// Price as shown on the page, e.g. `Rp 15.000`.
    pub fn display_price(&self) -> String {
        format_rupiah(self.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryItem {
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub comment: String,
    /// 1 to 5 stars.
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    /// Markdown.
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallToAction {
    pub title: String,
    pub subtitle: String,
    pub highlights: Vec<Stat>,
}

/// Format rupiah with `.` thousands separators.
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

impl SiteContent {
    pub fn validate(&self) -> Result<(), ContentError> {
        if let Some(t) = self.testimonials.iter().find(|t| !(1..=5).contains(&t.rating)) {
            return Err(ContentError::Validation(format!(
                "testimonial from '{}' has rating {}, expected 1-5",
                t.name, t.rating
            )));
        }
        let mut ids: Vec<&str> = self.services.iter().map(|s| s.id.as_str()).collect();
        ids.extend(self.pricing.iter().map(|p| p.id.as_str()));
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(ContentError::Validation(format!(
                "duplicate service/plan id '{}'",
                pair[0]
            )));
        }
        if let Some(link) = self.nav.iter().find(|l| !l.href.starts_with('#')) {
            return Err(ContentError::Validation(format!(
                "nav link '{}' must point at a section anchor",
                link.label
            )));
        }
        Ok(())
    }

    /// Service looked up by id or title (case-insensitive title match).
    pub fn find_service(&self, key: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.id == key || s.title.eq_ignore_ascii_case(key))
    }

    /// Plan looked up by id or name (case-insensitive name match).
    pub fn find_plan(&self, key: &str) -> Option<&PricingPlan> {
        self.pricing
            .iter()
            .find(|p| p.id == key || p.name.eq_ignore_ascii_case(key))
    }
}

/// Load `content.toml` from `root` over the stock content.
pub fn load_content(root: &Path) -> Result<SiteContent, ContentError> {
    let base = toml::Value::try_from(SiteContent::default()).expect("default content must serialize");
    let merged = match load_raw_toml(root, "content.toml")? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let content: SiteContent = merged.try_into()?;
    content.validate()?;
    Ok(content)
}

// =============================================================================
// Stock content
// =============================================================================

fn stat(value: &str, label: &str) -> Stat {
    Stat {
        value: value.to_string(),
        label: label.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "Laundry".to_string(),
            highlight: "Cepat, Bersih".to_string(),
            title_suffix: ", dan Wangi".to_string(),
            subtitle: "Nikmati layanan laundry profesional dengan teknologi modern, deterjen \
                       premium, dan jaminan kepuasan 100%. Tidak perlu repot, kami yang urus!"
                .to_string(),
            image: "https://images.unsplash.com/photo-1517677208171-0bc6725a3e60?q=80&w=800&auto=format&fit=crop"
                .to_string(),
            stats: vec![
                stat("500+", "Pelanggan Puas"),
                stat("100%", "Kepuasan"),
                stat("24/7", "Layanan"),
            ],
        }
    }
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            title: "Siap Laundry Tanpa Ribet?".to_string(),
            subtitle: "Hubungi kami sekarang dan dapatkan penawaran spesial untuk pelanggan baru. \
                       Proses mudah, cepat, dan terpercaya!"
                .to_string(),
            highlights: vec![
                stat("Respon Cepat", "Dalam 5 Menit"),
                stat("Tersedia", "24/7 Setiap Hari"),
                stat("Gratis Konsultasi", "Tanpa Komitmen"),
            ],
        }
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        let nav = [
            ("#home", "Beranda"),
            ("#services", "Layanan"),
            ("#pricing", "Harga"),
            ("#gallery", "Galeri"),
            ("#testimonials", "Testimoni"),
            ("#faq", "FAQ"),
            ("#contact", "Kontak"),
        ]
        .into_iter()
        .map(|(href, label)| NavLink {
            href: href.to_string(),
            label: label.to_string(),
        })
        .collect();

        let services = [
            ("cuci-kering", "Cuci Kering", "Layanan cuci lengkap dengan mesin otomatis dan deterjen premium"),
            ("cuci-setrika", "Cuci Setrika", "Paket lengkap cuci dan setrika dengan hasil sempurna"),
            ("setrika-saja", "Setrika Saja", "Setrika profesional untuk pakaian dengan hasil mantap"),
            ("express-3-jam", "Express 3 Jam", "Jaminan selesai dalam 3 jam untuk kebutuhan mendesak"),
            ("antar-jemput", "Antar Jemput Gratis", "Layanan antar jemput tanpa biaya tambahan untuk area tertentu"),
            ("dry-cleaning", "Dry Cleaning", "Pembersihan khusus untuk pakaian premium dan delicate"),
        ]
        .into_iter()
        .map(|(id, title, description)| Service {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect();

        let why_us = [
            ("Proses Cepat", "Layanan express 3 jam dengan kualitas terjamin untuk kebutuhan mendesak"),
            ("Mesin Modern", "Teknologi mesin cuci terkini untuk hasil maksimal tanpa merusak kain"),
            ("Deterjen Premium", "Menggunakan deterjen berkualitas tinggi yang aman untuk semua jenis kain"),
            ("Garansi Kebersihan", "Jaminan kepuasan atau uang kembali 100% tanpa pertanyaan"),
            ("Antar Jemput", "Layanan antar jemput gratis untuk area tertentu dengan tracking real-time"),
            ("Customer Support", "Tim support responsif 24/7 siap membantu semua kebutuhan Anda"),
        ]
        .into_iter()
        .map(|(title, description)| Feature {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect();

        let pricing = vec![
            PricingPlan {
                id: "regular".to_string(),
                name: "Paket Reguler".to_string(),
                price: 15_000,
                period: "per kg".to_string(),
                features: strings(&[
                    "Cuci Kering Standard",
                    "Deterjen Premium",
                    "Selesai dalam 2 hari",
                    "Pakaian rapi terlipat",
                    "Pengambilan standar",
                ]),
                cta: "Pilih Paket".to_string(),
                highlighted: false,
            },
            PricingPlan {
                id: "premium".to_string(),
                name: "Paket Express".to_string(),
                price: 25_000,
                period: "per kg".to_string(),
                features: strings(&[
                    "Cuci + Setrika",
                    "Deterjen Premium",
                    "Selesai dalam 3 jam",
                    "Kemasan premium",
                    "Antar jemput gratis",
                    "Priority handling",
                ]),
                cta: "Pilih Paket".to_string(),
                highlighted: true,
            },
            PricingPlan {
                id: "monthly".to_string(),
                name: "Paket Bulanan".to_string(),
                price: 300_000,
                period: "per bulan".to_string(),
                features: strings(&[
                    "Unlimited cuci kering",
                    "Gratis setrika 2x minggu",
                    "Cuaca apapun",
                    "Kemasan premium",
                    "Antar jemput gratis",
                    "Prioritas layanan",
                    "Konsultasi gratis",
                ]),
                cta: "Hubungi Kami".to_string(),
                highlighted: false,
            },
        ];

        let gallery = [
            ("Hasil Cuci Premium", "before-after", "photo-1582735689369-4fe89db7114c", "Pakaian putih kembali bersih cemerlang"),
            ("Laundry Facility", "facility", "photo-1604335399105-a0c585fd81a1", "Mesin cuci modern dan berkualitas tinggi"),
            ("Setrika Profesional", "service", "photo-1556821840-3a63f95609a7", "Hasil setrika yang rapi dan profesional"),
            ("Dry Cleaning Area", "facility", "photo-1567016432779-094069958ea5", "Area dry cleaning khusus pakaian premium"),
            ("Packaging Premium", "service", "photo-1558317374-067fb5f30001", "Kemasan premium untuk melindungi pakaian"),
            ("Clean & Fresh", "before-after", "photo-1521656693074-0ef32e80a5d5", "Hasil cuci yang bersih dan wangi"),
        ]
        .into_iter()
        .map(|(title, category, photo, description)| GalleryItem {
            title: title.to_string(),
            category: category.to_string(),
            image: format!("https://images.unsplash.com/{photo}?w=800&q=80"),
            description: description.to_string(),
        })
        .collect();

        let testimonials = [
            ("Budi Santoso", "Profesional Muda", "Layanan luar biasa! Pakaian saya selalu bersih dan wangi. Proses cepat dan staff yang ramah."),
            ("Siti Nurhaliza", "Ibu Rumah Tangga", "Tidak perlu repot lagi. Antar jemput gratis dan hasilnya sempurna. Rekomendasi untuk teman!"),
            ("Reza Wijaya", "Pengusaha", "Paket bulanan sangat membantu. Saya bisa fokus pada bisnis tanpa khawatir soal laundry."),
            ("Diana Kusuma", "Marketing Manager", "Express 3 jam sangat menyelamatkan. Buat rapat penting dan baju jadi dalam waktu singkat!"),
        ]
        .into_iter()
        .map(|(name, role, comment)| Testimonial {
            name: name.to_string(),
            role: role.to_string(),
            comment: comment.to_string(),
            rating: 5,
        })
        .collect();

        let faqs = [
            (
                "Berapa lama waktu yang dibutuhkan untuk cuci regular?",
                "Untuk layanan reguler, waktu yang dibutuhkan adalah 2 hari kerja. Namun, kami juga menyediakan layanan express yang dapat selesai dalam 3 jam untuk kebutuhan mendesak Anda.",
            ),
            (
                "Apakah layanan antar jemput benar-benar gratis?",
                "Ya, layanan antar jemput kami 100% gratis untuk area tertentu dengan minimum order 5kg. Untuk area di luar jangkauan, akan dikenakan biaya tambahan yang terjangkau.",
            ),
            (
                "Apa yang membedakan dry cleaning dengan cuci biasa?",
                "Dry cleaning adalah proses pembersihan tanpa menggunakan air, khusus untuk pakaian premium seperti jas, gaun pesta, dan bahan delicate yang tidak boleh terkena air. Prosesnya menggunakan solvent khusus yang aman untuk kain sensitif.",
            ),
            (
                "Bagaimana jika ada pakaian yang rusak atau hilang?",
                "Kami memiliki jaminan 100% ganti rugi untuk pakaian yang rusak atau hilang selama dalam perawatan kami. Setiap pakaian akan difoto dan dicatat dengan teliti sebelum proses pencucian.",
            ),
            (
                "Apakah deterjen yang digunakan aman untuk kulit sensitif?",
                "Sangat aman! Kami menggunakan deterjen premium hypoallergenic yang ramah untuk kulit sensitif dan anak-anak. Semua produk kami telah tersertifikasi dermatologi.",
            ),
            (
                "Bagaimana cara pembayaran yang tersedia?",
                "Kami menerima berbagai metode pembayaran: Cash, Transfer Bank (BCA, Mandiri, BRI, BNI), E-wallet (GoPay, OVO, DANA, ShopeePay), dan QRIS. Pembayaran dapat dilakukan saat pengambilan atau melalui transfer.",
            ),
            (
                "Apakah bisa cuci kiloan untuk selimut atau boneka besar?",
                "Bisa! Kami melayani cuci kiloan untuk berbagai jenis barang termasuk selimut, bed cover, boneka, karpet, dan gorden. Untuk barang berukuran besar, harga dihitung berdasarkan berat dan tingkat kesulitan.",
            ),
            (
                "Bagaimana cara melacak status laundry saya?",
                "Anda dapat melacak status laundry melalui WhatsApp kami. Tim kami akan memberikan update berkala dan mengirimkan notifikasi saat laundry Anda sudah siap untuk diambil.",
            ),
        ]
        .into_iter()
        .map(|(question, answer)| Faq {
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect();

        Self {
            nav,
            promo: PromoBanner::default(),
            hero: Hero::default(),
            services,
            why_us,
            pricing,
            gallery,
            testimonials,
            faqs,
            cta: CallToAction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stock_content_is_valid() {
        let content = SiteContent::default();
        content.validate().unwrap();
        assert_eq!(content.services.len(), 6);
        assert_eq!(content.pricing.len(), 3);
        assert_eq!(content.faqs.len(), 8);
        assert_eq!(content.nav.len(), 7);
        assert!(!content.promo.active);
    }

    #[test]
    fn exactly_one_plan_is_highlighted() {
        let content = SiteContent::default();
        let highlighted: Vec<_> = content.pricing.iter().filter(|p| p.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].name, "Paket Express");
    }

    #[test]
    fn rupiah_formatting() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(15_000), "Rp 15.000");
        assert_eq!(format_rupiah(300_000), "Rp 300.000");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
    }

    #[test]
    fn find_service_by_id_or_title() {
        let content = SiteContent::default();
        assert_eq!(content.find_service("dry-cleaning").unwrap().title, "Dry Cleaning");
        assert_eq!(content.find_service("cuci kering").unwrap().id, "cuci-kering");
        assert!(content.find_service("sepatu").is_none());
        assert_eq!(content.find_plan("monthly").unwrap().price, 300_000);
    }

    #[test]
    fn load_without_file_gives_stock() {
        let tmp = TempDir::new().unwrap();
        let content = load_content(tmp.path()).unwrap();
        assert_eq!(content.hero.highlight, "Cepat, Bersih");
    }

    #[test]
    fn overlay_merges_tables_and_replaces_arrays() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("content.toml"),
            r#"
[promo]
active = true
message = "Diskon 20%"

[[faqs]]
question = "Buka hari Minggu?"
answer = "Ya, **setiap hari**."
"#,
        )
        .unwrap();

        let content = load_content(tmp.path()).unwrap();
        assert!(content.promo.active);
        assert_eq!(content.promo.message, "Diskon 20%");
        assert_eq!(content.faqs.len(), 1);
        // Untouched sections keep stock values
        assert_eq!(content.services.len(), 6);
        assert_eq!(content.hero.stats.len(), 3);
    }

    #[test]
    fn overlay_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("content.toml"), "[hero]\nheadline = \"x\"\n").unwrap();
        assert!(matches!(load_content(tmp.path()), Err(ContentError::Toml(_))));
    }

    #[test]
    fn bad_rating_is_rejected() {
        let mut content = SiteContent::default();
        content.testimonials[0].rating = 6;
        assert!(matches!(content.validate(), Err(ContentError::Validation(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut content = SiteContent::default();
        content.pricing[0].id = "cuci-kering".to_string();
        let err = content.validate().unwrap_err().to_string();
        assert!(err.contains("cuci-kering"));
    }

    #[test]
    fn external_nav_link_is_rejected() {
        let mut content = SiteContent::default();
        content.nav[0].href = "https://example.com".to_string();
        assert!(content.validate().is_err());
    }
}
