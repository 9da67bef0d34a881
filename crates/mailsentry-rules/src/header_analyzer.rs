//! Header Analyser (C3, §4.2): turns `CanonicalEmail.auth_results` and
//! the address headers into [`HeaderFacts`].

use crate::types::{AuthResult, HeaderFacts};
use mailsentry_mime::{first_at_host, CanonicalEmail};
use once_cell::sync::Lazy;
use regex::Regex;

fn auth_token_re(field: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{field}\s*=\s*([a-z]+)")).expect("static regex")
}

static SPF_RE: Lazy<Regex> = Lazy::new(|| auth_token_re("spf"));
static DKIM_RE: Lazy<Regex> = Lazy::new(|| auth_token_re("dkim"));
static DMARC_RE: Lazy<Regex> = Lazy::new(|| auth_token_re("dmarc"));
static RE_SUBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^re\s*:").expect("static regex"));

fn extract_token(re: &Regex, auth_results: &str) -> AuthResult {
    re.captures(auth_results)
        .and_then(|c| c.get(1))
        .map(|m| AuthResult::from_token(m.as_str()))
        .unwrap_or(AuthResult::None)
}

/// Extracts [`HeaderFacts`] from a parsed message (§4.2).
pub fn analyze_headers(email: &CanonicalEmail) -> HeaderFacts {
    let auth_results = email.auth_results.as_deref().unwrap_or("");

    let from_domain = email.from.as_deref().and_then(first_at_host);
    let reply_to_domain = email.reply_to.as_deref().and_then(first_at_host);
    let return_path_domain = email.return_path.as_deref().and_then(first_at_host);

    let subject = email.subject.as_deref().unwrap_or("").trim();
    let references_empty = email.references.as_deref().map(str::trim).unwrap_or("").is_empty();
    let has_re_without_references = RE_SUBJECT.is_match(subject) && references_empty;

    HeaderFacts {
        spf_result: extract_token(&SPF_RE, auth_results),
        dkim_result: extract_token(&DKIM_RE, auth_results),
        dmarc_result: extract_token(&DMARC_RE, auth_results),
        from_domain,
        reply_to_domain,
        return_path_domain,
        received_count: email.received_headers.len(),
        has_re_without_references,
    }
}
