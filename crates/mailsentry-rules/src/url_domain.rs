//! URL/Domain Analyser (C4, §4.3): flags raised from the set of domains
//! and IPs a message links out to.

use crate::types::UrlDomainFlags;
use mailsentry_mime::{ip_hosts_in_urls, is_private_ipv4};

/// Known URL-shortener hosts, checked after `www.` stripping.
const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "t.co",
    "ow.ly",
    "cutt.ly",
    "rb.gy",
    "j.mp",
    "tiny.cc",
    "short.link",
    "is.gd",
    "buff.ly",
    "rebrand.ly",
    "bitly.com",
];

/// TLDs disproportionately favoured by phishing campaigns.
const SUSPICIOUS_TLDS: &[&str] = &[
    "xin", "win", "help", "bond", "cfd", "finance", "top", "xyz", "icu", "support", "vip", "pro",
    "sbs", "site", "online", "click", "tk", "ml", "ga", "cf", "gq", "club", "work",
];

/// A domain at or beyond this length (in characters) is considered long.
const LONG_DOMAIN_THRESHOLD: usize = 20;

fn tld_of(domain: &str) -> Option<&str> {
    domain.rsplit('.').next()
}

/// Computes [`UrlDomainFlags`] as a pure function of `urls` and `domains`
/// (§4.3): `domains` is expected already normalised (lowercased, `www.`
/// stripped) as produced by `extract_domains_ips`. `has_ip_in_url` looks
/// only at IPv4 literals among the URLs' own hosts, not
/// `CanonicalEmail.ips` at large (which also carries IPs pulled from
/// address headers and `Received` lines).
pub fn analyze_urls_domains(urls: &[String], domains: &[String]) -> UrlDomainFlags {
    let has_url_shortener = domains.iter().any(|d| {
        URL_SHORTENERS
            .iter()
            .any(|shortener| d == shortener || d.ends_with(&format!(".{shortener}")))
    });
    let has_long_domain = domains.iter().any(|d| d.len() > LONG_DOMAIN_THRESHOLD);
    let has_suspicious_tld = domains
        .iter()
        .any(|d| tld_of(d).map(|tld| SUSPICIOUS_TLDS.contains(&tld)).unwrap_or(false));
    let has_ip_in_url = ip_hosts_in_urls(urls).iter().any(|ip| !is_private_ipv4(ip));

    UrlDomainFlags {
        has_url_shortener,
        has_long_domain,
        has_suspicious_tld,
        has_ip_in_url,
    }
}
