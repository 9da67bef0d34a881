//! # MailSentry Core
//!
//! Unified phishing-detection facade over MailSentry's five analysis
//! components.
//!
//! ## Threat Coverage
//!
//! | Layer | Component | What it catches |
//! |-------|-----------|------------------|
//! | Structural | `mailsentry-mime` | header/body extraction, oversized or malformed MIME |
//! | Heuristic | `mailsentry-rules` | auth failures, domain mismatch, dangerous attachments |
//! | Reputation | `mailsentry-intel` | known-bad domains/IPs from URLhaus and OpenPhish |
//! | Statistical | `mailsentry-features` + `mailsentry-ml` | TF-IDF + synthetic features scored by a linear classifier |
//! | Decision | `aggregator` (this crate) | weighted fusion of the rule and ML scores into one verdict |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        MailSentry                            │
//! │                    (facade, this crate)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │   raw bytes                                                   │
//! │      │                                                        │
//! │      ▼                                                        │
//! │  ┌───────────┐   ┌────────────┐   ┌────────────┐              │
//! │  │   mime    │──▶│   rules    │──▶│ aggregator │──▶ verdict   │
//! │  │  (parse)  │   │ (+ intel)  │   │            │              │
//! │  └───────────┘   └────────────┘   └────────────┘              │
//! │        │                                ▲                     │
//! │        ▼                                │                     │
//! │  ┌───────────┐   ┌────────────┐         │                     │
//! │  │ features  │──▶│     ml     │─────────┘                     │
//! │  └───────────┘   └────────────┘                                │
//! │                                                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailsentry_core::{MailSentry, MailSentryConfig};
//! use mailsentry_ml::LinearMarginClassifier;
//! use std::sync::Arc;
//!
//! let sentinel = MailSentry::new(MailSentryConfig::default())?;
//! sentinel.load_classifier(Arc::new(LinearMarginClassifier::new(weights, bias)));
//!
//! let report = sentinel.analyze(&raw_message_bytes)?;
//! if report.is_phishing() {
//!     quarantine(&report);
//! }
//! ```
//!
//! ## Notes
//!
//! - Components run in a fixed order: parse → rules (with TI lookup) →
//!   features → ML → aggregate. A malformed message or an unloaded
//!   model aborts the pipeline rather than producing a partial verdict.
//! - A threat-intelligence store failure degrades to an empty
//!   reputation by default rather than aborting analysis; see
//!   [`GlobalConfig::degrade_on_ti_failure`].
//! - The TF-IDF vectoriser and scaler must be fit and persisted as a
//!   [`mailsentry_features::FeatureArtifact`] before `analyze` can
//!   succeed; there is no online fitting path.

mod aggregator;
mod config;
mod error;
mod sentinel;
mod types;

pub use aggregator::aggregate_and_decide;
pub use config::{AggregationConfig, FeaturesConfig, GlobalConfig, IntelConfig, MailSentryConfig};
pub use error::{MailSentryError, Result};
pub use sentinel::MailSentry;
pub use types::{AggregationDetail, DecisionReport, TriggeredRuleView};

// Re-exports of component types commonly needed alongside the facade.
pub use mailsentry_intel::{FeedSource, ImportStats};
pub use mailsentry_ml::Classifier;
pub use mailsentry_rules::{RiskLevel, RuleResult};
