//! Feature artefact persistence (§6 "Persisted state"): a single blob
//! holding the fitted vectoriser, the fitted scaler, and per-stage fit
//! flags.
//!
//! §9's open question ("the feature artefact has no embedded version
//! tag") is resolved here by an explicit `schema_version` field: loading
//! a mismatched artefact is a hard [`FeatureError::SchemaMismatch`]
//! rather than a silently shape-mismatched vector.

use crate::error::{FeatureError, Result};
use crate::scaler::MinMaxScaler;
use crate::tfidf::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the artefact's shape-determining fields change
/// (vocabulary encoding, synthetic feature count/order).
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureArtifact {
    pub schema_version: u32,
    pub vectorizer: TfidfVectorizer,
    pub scaler: MinMaxScaler,
}

impl Default for FeatureArtifact {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            vectorizer: TfidfVectorizer::default(),
            scaler: MinMaxScaler::default(),
        }
    }
}

impl FeatureArtifact {
    pub fn is_ready(&self) -> bool {
        self.vectorizer.is_fitted() && self.scaler.is_fitted()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let artifact: FeatureArtifact = serde_json::from_slice(&bytes)?;
        if artifact.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(FeatureError::SchemaMismatch {
                expected: CURRENT_SCHEMA_VERSION,
                found: artifact.schema_version,
            });
        }
        Ok(artifact)
    }
}
