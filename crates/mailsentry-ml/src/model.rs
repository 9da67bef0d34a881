//! The `Classifier` capability trait (§9 design note): a duck-typed
//! "anything with predict/predict_proba" model becomes a proper trait
//! seam. One concrete implementation is provided, a linear margin model;
//! the real classifier variant is otherwise unspecified (gradient-boosted
//! trees, linear margin model, or similar).

use serde::{Deserialize, Serialize};

/// Numerically stable logistic sigmoid: avoids overflow for large
/// `|margin|` by branching on its sign before exponentiating.
pub fn stable_sigmoid(margin: f32) -> f32 {
    if margin >= 0.0 {
        1.0 / (1.0 + (-margin).exp())
    } else {
        let exp_margin = margin.exp();
        exp_margin / (1.0 + exp_margin)
    }
}

/// A trained supervised classifier over a fixed-length feature vector.
/// Implementations may expose a native probability interface
/// ([`Classifier::probability`]) or only a margin/decision-function
/// interface, in which case the default `probability` implementation
/// derives one via [`stable_sigmoid`].
pub trait Classifier: Send + Sync {
    /// The model family name, surfaced as `MLResult.model_type`.
    fn model_type(&self) -> &str;

    /// Expected input dimensionality (`tfidf.len() + synthetic.len()`).
    fn input_dim(&self) -> usize;

    /// Hard class prediction: `1` for phishing, `0` for legitimate.
    fn predict(&self, vector: &[f32]) -> u8 {
        if self.probability(vector) >= 0.5 { 1 } else { 0 }
    }

    /// `P(phishing=1)`, in `[0,1]`.
    fn probability(&self, vector: &[f32]) -> f32;
}

/// A linear model exposing only a margin (decision-function) interface;
/// probability is derived via [`stable_sigmoid`], matching §4.9's
/// "if only a margin interface exists" branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearMarginClassifier {
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl LinearMarginClassifier {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    fn margin(&self, vector: &[f32]) -> f32 {
        let dot: f32 = self.weights.iter().zip(vector.iter()).map(|(w, x)| w * x).sum();
        dot + self.bias
    }
}

impl Classifier for LinearMarginClassifier {
    fn model_type(&self) -> &str {
        "linear_margin"
    }

    fn input_dim(&self) -> usize {
        self.weights.len()
    }

    fn probability(&self, vector: &[f32]) -> f32 {
        stable_sigmoid(self.margin(vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_handles_large_positive_and_negative_margins() {
        assert!((stable_sigmoid(100.0) - 1.0).abs() < 1e-6);
        assert!(stable_sigmoid(-100.0) < 1e-6);
        assert!((stable_sigmoid(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn linear_margin_classifier_predicts_from_sign_of_margin() {
        let classifier = LinearMarginClassifier::new(vec![1.0, 1.0], -1.0);
        assert_eq!(classifier.predict(&[0.0, 0.0]), 0);
        assert_eq!(classifier.predict(&[1.0, 1.0]), 1);
    }

    #[test]
    fn probability_is_derived_via_sigmoid() {
        let classifier = LinearMarginClassifier::new(vec![0.0, 0.0], 0.0);
        assert!((classifier.probability(&[1.0, 1.0]) - 0.5).abs() < 1e-6);
    }
}
