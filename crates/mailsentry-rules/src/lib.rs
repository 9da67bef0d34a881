//! # mailsentry-rules
//!
//! Header fact extraction (C3), URL/domain heuristics (C4), and the
//! weighted rule engine (C8) — everything between a [`CanonicalEmail`]
//! and a risk score that doesn't involve the ML model.
//!
//! [`CanonicalEmail`]: mailsentry_mime::CanonicalEmail

mod error;
mod header_analyzer;
mod rules;
mod types;
mod url_domain;

pub use error::{Result, RuleError};
pub use header_analyzer::analyze_headers;
pub use rules::evaluate;
pub use types::{
    AuthResult, HeaderFacts, RiskLevel, RuleDetail, RuleResult, TriggeredRule, UrlDomainFlags,
};
pub use url_domain::analyze_urls_domains;
