//! Pure URL/domain/IP extraction helpers used by [`crate::EmailParser`] (§4.1).

use crate::headers::first_at_host;
use crate::html;
use crate::util::{is_ipv4_literal, normalize_hostname};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\b(?:https?|ftp)://[^\s"'<>\[\]{}|\\^]+"#).expect("static regex"));
static RECEIVED_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfrom\s+([a-z0-9.-]+\.[a-z]{2,}|(?:\d{1,3}\.){3}\d{1,3})").expect("static regex")
});

/// URL-matching substrings of plain text, in order of appearance.
fn urls_in_text(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ';']).to_string())
        .collect()
}

/// Union of URL sources per §4.1: body text, HTML attributes, HTML visible
/// text. Deduplicated, first-seen order preserved.
pub fn extract_urls(body_plain: Option<&str>, body_html: Option<&str>) -> Vec<String> {
    let mut found = Vec::new();
    if let Some(plain) = body_plain {
        found.extend(urls_in_text(plain));
    }
    if let Some(html_body) = body_html {
        found.extend(html::extract_attribute_urls(html_body));
        found.extend(urls_in_text(&html::visible_text(html_body)));
    }
    dedup_preserve_order(found)
}

/// Normalised IPv4-literal hosts drawn only from `urls` (not from any
/// header), deduplicated. Used by C4's `has_ip_in_url` flag and C7's
/// `ip_count` synthetic feature, both of which §4.3/§4.7 define in terms
/// of URL hosts specifically rather than the broader `CanonicalEmail.ips`
/// (which also pulls IPs from address headers and `Received` lines).
pub fn ip_hosts_in_urls(urls: &[String]) -> Vec<String> {
    dedup_preserve_order(hosts_from_urls(urls).1)
}

/// Splits normalised hostnames drawn from `urls` into `(domains, ips)`.
fn hosts_from_urls(urls: &[String]) -> (Vec<String>, Vec<String>) {
    let mut domains = Vec::new();
    let mut ips = Vec::new();
    for raw in urls {
        let Ok(parsed) = url::Url::parse(raw) else { continue };
        let Some(host) = parsed.host_str() else { continue };
        let normalized = normalize_hostname(host);
        if is_ipv4_literal(&normalized) {
            ips.push(normalized);
        } else if !normalized.is_empty() {
            domains.push(normalized);
        }
    }
    (domains, ips)
}

/// Domain/IP extraction per §4.1: URL hosts, address-header `@host`s, and
/// `Received` `from <host>` substrings, each routed to `domains` or `ips`
/// by IPv4-literal validation.
pub fn extract_domains_ips(
    urls: &[String],
    address_headers: &[Option<&str>],
    received_headers: &[String],
) -> (Vec<String>, Vec<String>) {
    let (mut domains, mut ips) = hosts_from_urls(urls);

    for header in address_headers.iter().flatten() {
        if let Some(host) = first_at_host(header) {
            let normalized = normalize_hostname(&host);
            if is_ipv4_literal(&normalized) {
                ips.push(normalized);
            } else if !normalized.is_empty() {
                domains.push(normalized);
            }
        }
    }

    for received in received_headers {
        if let Some(caps) = RECEIVED_FROM_RE.captures(received) {
            let host = normalize_hostname(&caps[1]);
            if is_ipv4_literal(&host) {
                ips.push(host);
            } else if !host.is_empty() {
                domains.push(host);
            }
        }
    }

    (dedup_preserve_order(domains), dedup_preserve_order(ips))
}

fn dedup_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
