//! `MinMaxScaler` over the ten synthetic features (§4.7): fit once on
//! the training corpus, clip to `[0,1]` at transform time.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Vec<f32>,
    max: Vec<f32>,
    is_fitted: bool,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self { min: Vec::new(), max: Vec::new(), is_fitted: false }
    }
}

impl MinMaxScaler {
    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Fits per-column min/max from a matrix of raw synthetic feature
    /// rows (each the same fixed length).
    pub fn fit(&mut self, rows: &[Vec<f32>]) {
        let Some(width) = rows.first().map(|r| r.len()) else {
            self.min = Vec::new();
            self.max = Vec::new();
            self.is_fitted = false;
            return;
        };

        let mut min = vec![f32::MAX; width];
        let mut max = vec![f32::MIN; width];
        for row in rows {
            for (i, value) in row.iter().enumerate() {
                min[i] = min[i].min(*value);
                max[i] = max[i].max(*value);
            }
        }

        self.min = min;
        self.max = max;
        self.is_fitted = true;
    }

    /// Scales `raw` into `[0,1]` per column, clipping after transform as
    /// §4.7 requires. Before fitting, returns zeros.
    pub fn transform(&self, raw: &Array1<f32>) -> Array1<f32> {
        if !self.is_fitted || self.min.len() != raw.len() {
            return Array1::zeros(raw.len());
        }

        Array1::from_iter(raw.iter().enumerate().map(|(i, value)| {
            let span = self.max[i] - self.min[i];
            let scaled = if span.abs() < f32::EPSILON { 0.0 } else { (value - self.min[i]) / span };
            scaled.clamp(0.0, 1.0)
        }))
    }
}
