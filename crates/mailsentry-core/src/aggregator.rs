//! Score Aggregator & Decision module (C10, §4.10): fuses the ML
//! posterior and the rule engine's risk score into one [`DecisionReport`].
//!
//! Weight renormalisation, clamping, fusion, thresholding and report
//! assembly, typed against this workspace's [`MLResult`]/[`RuleResult`]
//! instead of dynamic dicts.

use crate::config::AggregationConfig;
use crate::types::{AggregationDetail, DecisionReport, TriggeredRuleView};
use mailsentry_ml::MLResult;
use mailsentry_rules::RuleResult;

fn clamp01(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Fuses `ml` and `rules` per §4.10's five steps, returning the full
/// report. Never fails — non-finite inputs are clamped (§7).
pub fn aggregate_and_decide(ml: &MLResult, rules: &RuleResult, weights: AggregationConfig) -> DecisionReport {
    let mut weights = weights;
    weights.renormalize();

    let ml_confidence = clamp01(ml.phishing_probability);
    let risk_norm = clamp01(rules.risk_score as f32 / 100.0);

    let final_score = clamp01(weights.w_ml * ml_confidence + weights.w_rules * risk_norm);
    let verdict = if final_score >= weights.threshold { 1 } else { 0 };

    let triggered_rules_formatted = rules
        .triggered_rules
        .iter()
        .map(|r| TriggeredRuleView {
            rule: r.name.clone(),
            triggered: true,
            details: r.description.clone(),
        })
        .collect();

    DecisionReport {
        verdict,
        final_score,
        aggregation: AggregationDetail {
            ml_confidence,
            risk_score: rules.risk_score,
            risk_norm,
            w_ml: weights.w_ml,
            w_rules: weights.w_rules,
            threshold: weights.threshold,
        },
        ml: ml.clone(),
        rules: rules.clone(),
        triggered_rules_formatted,
    }
}
