//! Synthetic (hand-crafted) features (§4.7): 3 quantitative + 2
//! structural + 4 binary + 1 linguistic, in that fixed order.

use crate::lexicon::URGENCY_KEYWORDS;
use mailsentry_mime::{ip_hosts_in_urls, CanonicalEmail};
use mailsentry_rules::UrlDomainFlags;
use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed length of the synthetic feature block (§3 `FeatureVector`).
pub const SYNTHETIC_LEN: usize = 10;

static URGENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    URGENCY_KEYWORDS
        .iter()
        .map(|kw| {
            let escaped = regex::escape(kw);
            Regex::new(&format!(r"(?i)\b{escaped}\b")).expect("static regex")
        })
        .collect()
});

fn urgency_keyword_count(translated_text: &str) -> f32 {
    if translated_text.is_empty() {
        return 0.0;
    }
    URGENCY_PATTERNS.iter().map(|re| re.find_iter(translated_text).count() as f32).sum()
}

/// Computes the raw (unscaled) 10-length synthetic feature vector for
/// one message. `url_flags` is the [`UrlDomainFlags`] computed over the
/// message's domains/IPs (C4); `translated_text` is the output of
/// [`crate::translate::translate_text`] over the effective body.
pub fn compute_synthetic_features(
    email: &CanonicalEmail,
    url_flags: &UrlDomainFlags,
    translated_text: &str,
) -> Array1<f32> {
    let url_count = email.urls.len() as f32;
    let attachment_count = email.attachments.len() as f32;
    // IPs embedded in `urls` only (not headers) — the asymmetry spec.md
    // documents and preserves relative to the rule engine's TI lookup.
    let ip_count = ip_hosts_in_urls(&email.urls).len() as f32;

    let subject_length = email.subject.as_deref().unwrap_or("").chars().count() as f32;
    let body_length = email.effective_body().chars().count() as f32;

    let binary = [
        url_flags.has_url_shortener as u8 as f32,
        url_flags.has_long_domain as u8 as f32,
        url_flags.has_suspicious_tld as u8 as f32,
        url_flags.has_ip_in_url as u8 as f32,
    ];

    let urgency = urgency_keyword_count(translated_text);

    Array1::from(vec![
        url_count,
        attachment_count,
        ip_count,
        subject_length,
        body_length,
        binary[0],
        binary[1],
        binary[2],
        binary[3],
        urgency,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsentry_mime::CanonicalEmail;

    #[test]
    fn vector_has_fixed_length() {
        let email = CanonicalEmail::default();
        let vector = compute_synthetic_features(&email, &UrlDomainFlags::default(), "");
        assert_eq!(vector.len(), SYNTHETIC_LEN);
    }

    #[test]
    fn counts_quantitative_features() {
        let email = CanonicalEmail {
            urls: vec!["http://example.com/a".to_string(), "http://1.2.3.4/b".to_string()],
            ..Default::default()
        };
        let vector = compute_synthetic_features(&email, &UrlDomainFlags::default(), "");
        assert_eq!(vector[0], 2.0); // url_count
        assert_eq!(vector[2], 1.0); // ip_count from URLs only
    }

    #[test]
    fn counts_urgency_keywords_whole_word() {
        let email = CanonicalEmail::default();
        let vector = compute_synthetic_features(
            &email,
            &UrlDomainFlags::default(),
            "urgent: verify your account now, this is urgent",
        );
        assert!(vector[9] >= 2.0);
    }

    #[test]
    fn body_length_prefers_plain_over_html() {
        let email = CanonicalEmail {
            body_plain: Some("short".to_string()),
            body_html: Some("<p>a much longer html body here</p>".to_string()),
            ..Default::default()
        };
        let vector = compute_synthetic_features(&email, &UrlDomainFlags::default(), "");
        assert_eq!(vector[4], 5.0);
    }
}
