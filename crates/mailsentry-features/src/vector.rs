//! [`FeatureVector`] (§3): the hybrid TF-IDF + synthetic representation
//! handed to the ML adapter (C9).

use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub tfidf: Vec<f32>,
    pub synthetic: Vec<f32>,
    pub combined: Vec<f32>,
}

impl FeatureVector {
    pub fn new(tfidf: Array1<f32>, synthetic: Array1<f32>) -> Self {
        let combined: Vec<f32> = tfidf.iter().chain(synthetic.iter()).copied().collect();
        Self { tfidf: tfidf.to_vec(), synthetic: synthetic.to_vec(), combined }
    }

    pub fn len(&self) -> usize {
        self.combined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }
}
