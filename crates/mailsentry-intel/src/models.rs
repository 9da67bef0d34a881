use serde::{Deserialize, Serialize};

/// The kind of indicator stored (§3 `Indicator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorKind {
    Domain,
    Ip,
}

impl IndicatorKind {
    pub fn table(self) -> &'static str {
        match self {
            IndicatorKind::Domain => "malicious_domains",
            IndicatorKind::Ip => "malicious_ips",
        }
    }
}

/// One threat-intelligence indicator, unique per `(kind, key)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub key: String,
    pub kind: IndicatorKind,
    pub threat_type: String,
    pub source: String,
    pub date_added: String,
}

/// Batch reputation result for a message's domains/IPs (§3 `TIReputation`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TIReputation {
    pub malicious_domains: Vec<String>,
    pub malicious_ips: Vec<String>,
    pub domain_in_urlhaus: bool,
    pub domain_in_openphish: bool,
    pub ip_in_blacklist: bool,
}

impl TIReputation {
    /// The empty reputation used when TI lookups are unavailable (§7
    /// resource-error degradation path): no hits, no flags.
    pub fn empty() -> Self {
        Self::default()
    }
}
