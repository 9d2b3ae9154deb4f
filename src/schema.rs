//! schema.org structured data for the page head.
//!
//! Three JSON-LD documents are emitted: the `LocalBusiness` itself, a
//! `Service` with an offer per listed service, and an `FAQPage`.

use crate::config::BusinessConfig;
use crate::content::SiteContent;
use crate::security::url_guard::sanitize_url;
use serde_json::{Value, json};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn business_schema(business: &BusinessConfig, content: &SiteContent) -> Value {
    let same_as: Vec<String> = business
        .social_links()
        .into_iter()
        .filter_map(|(_, url)| sanitize_url(url))
        .collect();

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "LocalBusiness",
        "@id": business.site_url,
        "name": business.name,
        "url": business.site_url,
        "telephone": business.phone,
        "email": business.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": business.address,
            "addressCountry": "ID",
        },
        "openingHoursSpecification": {
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": DAYS,
            "description": business.hours,
        },
        "sameAs": same_as,
    });

    if let Some(range) = price_range(content) {
        schema["priceRange"] = Value::String(range);
    }
    schema
}

pub fn service_schema(business: &BusinessConfig, content: &SiteContent) -> Value {
    let offers: Vec<Value> = content
        .services
        .iter()
        .map(|s| {
            json!({
                "@type": "Offer",
                "itemOffered": {
                    "@type": "Service",
                    "name": s.title,
                    "description": s.description,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "serviceType": "Laundry Service",
        "provider": { "@type": "LocalBusiness", "name": business.name },
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": "Laundry Services",
            "itemListElement": offers,
        },
    })
}

pub fn faq_schema(content: &SiteContent) -> Value {
    let questions: Vec<Value> = content
        .faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

/// `Rp <cheapest> - Rp <dearest>` across the pricing plans.
fn price_range(content: &SiteContent) -> Option<String> {
    let min = content.pricing.iter().min_by_key(|p| p.price)?;
    let max = content.pricing.iter().max_by_key(|p| p.price)?;
    Some(format!("{} - {}", min.display_price(), max.display_price()))
}

/// Serialize for an inline `<script type="application/ld+json">`.
///
/// `<` is emitted as `\u003c` so string values cannot close the script element.
pub fn to_script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_schema_uses_config() {
        let mut business = BusinessConfig::default();
        business.name = "Cuci Kilat".to_string();
        let schema = business_schema(&business, &SiteContent::default());
        assert_eq!(schema["@type"], "LocalBusiness");
        assert_eq!(schema["name"], "Cuci Kilat");
        assert_eq!(schema["priceRange"], "Rp 15.000 - Rp 300.000");
        assert_eq!(schema["sameAs"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn same_as_drops_unlisted_hosts() {
        let mut business = BusinessConfig::default();
        business.facebook = "https://evil.example/page".to_string();
        business.tiktok = String::new();
        let schema = business_schema(&business, &SiteContent::default());
        assert_eq!(
            schema["sameAs"],
            json!(["https://instagram.com/laundrymodern"])
        );
    }

    #[test]
    fn no_plans_means_no_price_range() {
        let content = SiteContent {
            pricing: Vec::new(),
            ..SiteContent::default()
        };
        let schema = business_schema(&BusinessConfig::default(), &content);
        assert!(schema.get("priceRange").is_none());
    }

    #[test]
    fn service_schema_lists_every_service() {
        let content = SiteContent::default();
        let schema = service_schema(&BusinessConfig::default(), &content);
        let offers = schema["hasOfferCatalog"]["itemListElement"].as_array().unwrap();
        assert_eq!(offers.len(), content.services.len());
        assert_eq!(offers[0]["itemOffered"]["name"], "Cuci Kering");
    }

    #[test]
    fn faq_schema_lists_questions() {
        let schema = faq_schema(&SiteContent::default());
        assert_eq!(schema["mainEntity"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn script_json_cannot_close_the_element() {
        let value = json!({ "name": "</script><script>alert(1)</script>" });
        let out = to_script_json(&value);
        assert!(!out.contains("</script"));
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, value);
    }
}
