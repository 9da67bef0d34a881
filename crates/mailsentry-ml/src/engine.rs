//! The adapter itself (C9): an `Arc`-friendly handle over a loaded
//! [`Classifier`], tracking basic inference stats and supporting a
//! `reload` hot path — the same shape as
//! `abiolaogu-SASE-SDWAN::InferenceEngine`, specialised to one model
//! slot instead of four detectors.

use crate::error::{MlError, Result};
use crate::model::Classifier;
use crate::types::MLResult;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct InferenceStats {
    pub total_inferences: u64,
    pub total_latency_us: u64,
}

impl InferenceStats {
    pub fn avg_latency_us(&self) -> f64 {
        if self.total_inferences == 0 {
            0.0
        } else {
            self.total_latency_us as f64 / self.total_inferences as f64
        }
    }
}

/// Holds an optional loaded [`Classifier`] plus inference statistics.
/// `classify`/`classify_many` fail with [`MlError::ModelNotLoaded`]
/// until [`InferenceEngine::load`] installs a model (§4.9).
pub struct InferenceEngine {
    model: RwLock<Option<Arc<dyn Classifier>>>,
    stats: RwLock<InferenceStats>,
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self { model: RwLock::new(None), stats: RwLock::new(InferenceStats::default()) }
    }

    /// Installs `classifier` as the active model, replacing any
    /// previously loaded one (the hot-reload path).
    pub fn load(&self, classifier: Arc<dyn Classifier>) {
        tracing::info!(model_type = classifier.model_type(), "ml model loaded");
        *self.model.write() = Some(classifier);
    }

    pub fn is_loaded(&self) -> bool {
        self.model.read().is_some()
    }

    pub fn stats(&self) -> InferenceStats {
        self.stats.read().clone()
    }

    /// Classifies one feature vector. Errors with
    /// [`MlError::ModelNotLoaded`] if [`Self::load`] has not been called.
    pub fn classify(&self, vector: &[f32]) -> Result<MLResult> {
        let guard = self.model.read();
        let classifier = guard.as_ref().ok_or(MlError::ModelNotLoaded)?;

        if vector.len() != classifier.input_dim() {
            return Err(MlError::DimensionMismatch { expected: classifier.input_dim(), found: vector.len() });
        }

        let start = Instant::now();
        let probability = classifier.probability(vector);
        let elapsed = start.elapsed();

        let mut stats = self.stats.write();
        stats.total_inferences += 1;
        stats.total_latency_us += elapsed.as_micros() as u64;
        drop(stats);

        Ok(MLResult::from_probability(probability, classifier.model_type()))
    }

    /// Batched inference (§4.9 `classify_many`) for throughput; stops at
    /// the first error.
    pub fn classify_many(&self, vectors: &[Vec<f32>]) -> Result<Vec<MLResult>> {
        vectors.iter().map(|v| self.classify(v)).collect()
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearMarginClassifier;

    #[test]
    fn classify_before_load_fails() {
        let engine = InferenceEngine::new();
        let result = engine.classify(&[0.0, 0.0]);
        assert!(matches!(result, Err(MlError::ModelNotLoaded)));
    }

    #[test]
    fn classify_after_load_succeeds_and_tracks_stats() {
        let engine = InferenceEngine::new();
        engine.load(Arc::new(LinearMarginClassifier::new(vec![1.0, 1.0], 2.0)));

        let result = engine.classify(&[1.0, 1.0]).unwrap();
        assert_eq!(result.prediction, 1);
        assert_eq!(engine.stats().total_inferences, 1);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let engine = InferenceEngine::new();
        engine.load(Arc::new(LinearMarginClassifier::new(vec![1.0, 1.0], 0.0)));
        let result = engine.classify(&[1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(MlError::DimensionMismatch { expected: 2, found: 3 })));
    }

    #[test]
    fn classify_many_preserves_order() {
        let engine = InferenceEngine::new();
        engine.load(Arc::new(LinearMarginClassifier::new(vec![10.0], -5.0)));
        let results = engine.classify_many(&[vec![0.0], vec![1.0]]).unwrap();
        assert_eq!(results[0].prediction, 0);
        assert_eq!(results[1].prediction, 1);
    }
}
