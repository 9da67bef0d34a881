//! The Aggregator's own data types (§3 `DecisionReport`): everything
//! downstream of a message's `MLResult` + `RuleResult` pair.

use mailsentry_ml::MLResult;
use mailsentry_rules::RuleResult;
use serde::{Deserialize, Serialize};

/// One triggered rule, reshaped for an external report consumer (§4.10
/// step 6's `triggered_rules_formatted` view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredRuleView {
    pub rule: String,
    pub triggered: bool,
    pub details: String,
}

/// The numbers behind the final fused score (§3 `DecisionReport.aggregation`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationDetail {
    pub ml_confidence: f32,
    pub risk_score: u32,
    pub risk_norm: f32,
    pub w_ml: f32,
    pub w_rules: f32,
    pub threshold: f32,
}

/// The pipeline's final output (§3 `DecisionReport`): the binary
/// verdict, the fused score, the weights/intermediates that produced it,
/// and the full `ml`/`rules` sections it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// `1` iff `final_score >= threshold` (phishing), else `0`.
    pub verdict: u8,
    pub final_score: f32,
    pub aggregation: AggregationDetail,
    pub ml: MLResult,
    pub rules: RuleResult,
    pub triggered_rules_formatted: Vec<TriggeredRuleView>,
}

impl DecisionReport {
    pub fn is_phishing(&self) -> bool {
        self.verdict == 1
    }
}
