use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An SPF/DKIM/DMARC authentication outcome (§3 `HeaderFacts`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthResult {
    Pass,
    Fail,
    Softfail,
    Neutral,
    None,
}

impl AuthResult {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "pass" => AuthResult::Pass,
            "fail" => AuthResult::Fail,
            "softfail" => AuthResult::Softfail,
            "neutral" => AuthResult::Neutral,
            _ => AuthResult::None,
        }
    }

    pub fn is_fail(self) -> bool {
        matches!(self, AuthResult::Fail)
    }
}

impl Default for AuthResult {
    fn default() -> Self {
        AuthResult::None
    }
}

/// Header-derived facts (C3, §3 `HeaderFacts`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFacts {
    pub spf_result: AuthResult,
    pub dkim_result: AuthResult,
    pub dmarc_result: AuthResult,
    pub from_domain: Option<String>,
    pub reply_to_domain: Option<String>,
    pub return_path_domain: Option<String>,
    pub received_count: usize,
    pub has_re_without_references: bool,
}

/// URL/domain heuristic flags (C4, §3 `UrlDomainFlags`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlDomainFlags {
    pub has_url_shortener: bool,
    pub has_long_domain: bool,
    pub has_suspicious_tld: bool,
    pub has_ip_in_url: bool,
}

/// Coarse bucket over `risk_score` (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s < 30 => RiskLevel::Low,
            s if s <= 69 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

/// One rule that fired, for the audit trail (§3 `RuleResult`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredRule {
    pub name: String,
    pub weight: u32,
    pub description: String,
}

/// Per-rule evaluation detail, whether or not it triggered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDetail {
    pub triggered: bool,
    pub score: u32,
    pub details: String,
}

/// The rule engine's complete output (§3 `RuleResult`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub triggered_rules: Vec<TriggeredRule>,
    pub rule_details: HashMap<String, RuleDetail>,
}

impl Default for RuleResult {
    fn default() -> Self {
        Self {
            risk_score: 0,
            risk_level: RiskLevel::Low,
            triggered_rules: Vec::new(),
            rule_details: HashMap::new(),
        }
    }
}
