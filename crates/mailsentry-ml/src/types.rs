use serde::{Deserialize, Serialize};

/// The ML adapter's per-message output (§3 `MLResult`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MLResult {
    pub prediction: u8,
    pub phishing_probability: f32,
    pub confidence: f32,
    pub class_label: String,
    pub model_type: String,
}

impl MLResult {
    /// Builds a result from a raw `phishing_probability`, deriving
    /// `prediction`/`confidence`/`class_label` per §3's invariant:
    /// `confidence = phishing_probability` when `prediction=1`, else
    /// `1 - phishing_probability`.
    pub fn from_probability(phishing_probability: f32, model_type: &str) -> Self {
        let phishing_probability = phishing_probability.clamp(0.0, 1.0);
        let prediction = if phishing_probability >= 0.5 { 1 } else { 0 };
        let confidence = if prediction == 1 { phishing_probability } else { 1.0 - phishing_probability };
        let class_label = if prediction == 1 { "phishing" } else { "legitimate" }.to_string();

        Self { prediction, phishing_probability, confidence, class_label, model_type: model_type.to_string() }
    }
}
