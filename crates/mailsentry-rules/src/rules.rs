//! Weighted Rule Engine (C8, §4.8): fuses [`HeaderFacts`], a message's
//! attachments, and a [`TIReputation`] lookup into a [`RuleResult`].
//!
//! Weights are the fixed defaults from §4.8 — configurable in principle,
//! stable for a run in practice, so this crate hardcodes them.

use crate::types::{HeaderFacts, RiskLevel, RuleDetail, RuleResult, TriggeredRule, UrlDomainFlags};
use mailsentry_intel::TIReputation;
use mailsentry_mime::CanonicalEmail;
use std::collections::HashMap;

const AUTH_WEIGHT_PER_MECHANISM: u32 = 20;
const DOMAIN_MISMATCH_WEIGHT: u32 = 30;
const REPLY_ANOMALY_WEIGHT: u32 = 30;
const TI_WEIGHT_PER_INDICATOR: u32 = 60;
const DANGEROUS_ATTACHMENT_WEIGHT: u32 = 40;

const DANGEROUS_EXTENSIONS: &[&str] = &[
    "exe", "scr", "bat", "cmd", "com", "pif", "vbs", "js", "jar", "app", "deb", "pkg", "dmg",
    "msi", "dll", "lnk", "hta", "wsf", "ps1", "sh", "run", "bin", "rar", "7z", "zip",
];

fn extension_of(filename: &str) -> Option<String> {
    filename.rsplit('.').next().map(|ext| ext.to_ascii_lowercase())
}

fn authentication_rule(facts: &HeaderFacts) -> (u32, bool, String) {
    let mut weight = 0;
    let mut failed = Vec::new();
    if facts.spf_result.is_fail() {
        weight += AUTH_WEIGHT_PER_MECHANISM;
        failed.push("SPF");
    }
    if facts.dkim_result.is_fail() {
        weight += AUTH_WEIGHT_PER_MECHANISM;
        failed.push("DKIM");
    }
    if facts.dmarc_result.is_fail() {
        weight += AUTH_WEIGHT_PER_MECHANISM;
        failed.push("DMARC");
    }
    let details = if failed.is_empty() {
        "no authentication mechanism failed".to_string()
    } else {
        format!("failed: {}", failed.join(", "))
    };
    (weight, !failed.is_empty(), details)
}

fn domain_mismatch_rule(facts: &HeaderFacts) -> (u32, bool, String) {
    let from = facts.from_domain.as_deref();
    let reply_to_mismatch = match (&from, &facts.reply_to_domain) {
        (Some(from), Some(reply_to)) if !reply_to.is_empty() => from != reply_to,
        _ => false,
    };
    let return_path_mismatch = match (&from, &facts.return_path_domain) {
        (Some(from), Some(return_path)) => from != return_path,
        _ => false,
    };
    let triggered = reply_to_mismatch || return_path_mismatch;
    let details = if !triggered {
        "from/reply-to/return-path domains agree".to_string()
    } else {
        format!(
            "from={:?} reply_to={:?} return_path={:?}",
            facts.from_domain, facts.reply_to_domain, facts.return_path_domain
        )
    };
    (if triggered { DOMAIN_MISMATCH_WEIGHT } else { 0 }, triggered, details)
}

fn reply_anomaly_rule(facts: &HeaderFacts) -> (u32, bool, String) {
    let details = if facts.has_re_without_references {
        "subject begins with Re: but References is empty".to_string()
    } else {
        "no reply anomaly".to_string()
    };
    (
        if facts.has_re_without_references { REPLY_ANOMALY_WEIGHT } else { 0 },
        facts.has_re_without_references,
        details,
    )
}

fn threat_intelligence_rule(reputation: &TIReputation) -> (u32, bool, String) {
    let domain_count = reputation.malicious_domains.len() as u32;
    let ip_count = reputation.malicious_ips.len() as u32;
    let weight = (domain_count + ip_count) * TI_WEIGHT_PER_INDICATOR;
    let triggered = weight > 0;
    let details = if triggered {
        format!(
            "{} malicious domain(s), {} malicious ip(s)",
            domain_count, ip_count
        )
    } else {
        "no threat-intelligence hits".to_string()
    };
    (weight, triggered, details)
}

fn dangerous_attachments_rule(email: &CanonicalEmail) -> (u32, bool, String) {
    let dangerous: Vec<&str> = email
        .attachments
        .iter()
        .filter(|a| {
            extension_of(&a.name)
                .map(|ext| DANGEROUS_EXTENSIONS.contains(&ext.as_str()))
                .unwrap_or(false)
        })
        .map(|a| a.name.as_str())
        .collect();
    let triggered = !dangerous.is_empty();
    let details = if triggered {
        format!("dangerous attachment(s): {}", dangerous.join(", "))
    } else {
        "no dangerous attachment extensions".to_string()
    };
    (if triggered { DANGEROUS_ATTACHMENT_WEIGHT } else { 0 }, triggered, details)
}

/// Evaluates every rule against the given inputs and assembles a
/// [`RuleResult`]. Never fails (§4.8): any missing fact simply yields a
/// non-triggering rule with an explanatory detail.
pub fn evaluate(
    email: &CanonicalEmail,
    facts: &HeaderFacts,
    _url_flags: &UrlDomainFlags,
    reputation: &TIReputation,
) -> RuleResult {
    let evaluations: [(&str, u32, bool, String); 5] = [
        {
            let (w, t, d) = authentication_rule(facts);
            ("authentication", w, t, d)
        },
        {
            let (w, t, d) = domain_mismatch_rule(facts);
            ("domain_mismatch", w, t, d)
        },
        {
            let (w, t, d) = reply_anomaly_rule(facts);
            ("reply_anomaly", w, t, d)
        },
        {
            let (w, t, d) = threat_intelligence_rule(reputation);
            ("threat_intelligence", w, t, d)
        },
        {
            let (w, t, d) = dangerous_attachments_rule(email);
            ("dangerous_attachments", w, t, d)
        },
    ];

    let mut triggered_rules = Vec::new();
    let mut rule_details = HashMap::new();
    let mut total = 0u32;

    for (name, weight, triggered, details) in evaluations {
        total += weight;
        rule_details.insert(
            name.to_string(),
            RuleDetail { triggered, score: weight, details: details.clone() },
        );
        if triggered {
            triggered_rules.push(TriggeredRule { name: name.to_string(), weight, description: details });
        }
    }

    let risk_score = total.min(100);
    RuleResult {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        triggered_rules,
        rule_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthResult;
    use mailsentry_mime::{Attachment, AttachmentHash};

    fn empty_reputation() -> TIReputation {
        TIReputation::empty()
    }

    #[test]
    fn clean_email_scores_zero() {
        let email = CanonicalEmail::default();
        let facts = HeaderFacts::default();
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &empty_reputation());
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.triggered_rules.is_empty());
    }

    #[test]
    fn triple_auth_fail_plus_reply_to_mismatch_scores_ninety() {
        let facts = HeaderFacts {
            spf_result: AuthResult::Fail,
            dkim_result: AuthResult::Fail,
            dmarc_result: AuthResult::Fail,
            from_domain: Some("sberbank.ru".to_string()),
            reply_to_domain: Some("evil-domain.tk".to_string()),
            return_path_domain: Some("sberbank.ru".to_string()),
            ..Default::default()
        };
        let email = CanonicalEmail::default();
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &empty_reputation());
        assert_eq!(result.risk_score, 90);
        assert_eq!(result.risk_level, RiskLevel::High);
        let names: Vec<&str> = result.triggered_rules.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"authentication"));
        assert!(names.contains(&"domain_mismatch"));
    }

    #[test]
    fn threat_intelligence_weight_per_indicator() {
        let mut reputation = empty_reputation();
        reputation.malicious_domains.push("sberbank-secure.tk".to_string());
        let email = CanonicalEmail::default();
        let facts = HeaderFacts::default();
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &reputation);
        assert_eq!(result.risk_score, 60);
        assert!(result.triggered_rules.iter().any(|r| r.name == "threat_intelligence"));
    }

    #[test]
    fn dangerous_attachment_triggers_weight_forty() {
        let email = CanonicalEmail {
            attachments: vec![Attachment {
                name: "invoice.exe".to_string(),
                content_type: "application/octet-stream".to_string(),
                size: 100,
                sha256: AttachmentHash::Sha256("deadbeef".to_string()),
            }],
            ..Default::default()
        };
        let facts = HeaderFacts::default();
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &empty_reputation());
        assert_eq!(result.risk_score, 40);
        assert!(result.triggered_rules.iter().any(|r| r.name == "dangerous_attachments"));
    }

    #[test]
    fn reply_anomaly_triggers_weight_thirty() {
        let facts = HeaderFacts { has_re_without_references: true, ..Default::default() };
        let email = CanonicalEmail::default();
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &empty_reputation());
        assert_eq!(result.risk_score, 30);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn risk_score_caps_at_one_hundred() {
        let facts = HeaderFacts {
            spf_result: AuthResult::Fail,
            dkim_result: AuthResult::Fail,
            dmarc_result: AuthResult::Fail,
            from_domain: Some("a.com".to_string()),
            reply_to_domain: Some("b.com".to_string()),
            return_path_domain: Some("c.com".to_string()),
            has_re_without_references: true,
            ..Default::default()
        };
        let mut reputation = empty_reputation();
        reputation.malicious_domains.push("x.tk".to_string());
        reputation.malicious_ips.push("1.2.3.4".to_string());
        let email = CanonicalEmail {
            attachments: vec![Attachment {
                name: "bad.exe".to_string(),
                content_type: "application/octet-stream".to_string(),
                size: 1,
                sha256: AttachmentHash::SkippedTooLarge,
            }],
            ..Default::default()
        };
        let result = evaluate(&email, &facts, &UrlDomainFlags::default(), &reputation);
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.risk_level, RiskLevel::High);
    }
}
