//! Configuration types for the MailSentry facade.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the [`crate::MailSentry`] facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSentryConfig {
    /// Threat-intelligence store configuration.
    pub intel: IntelConfig,

    /// Feature builder configuration.
    pub features: FeaturesConfig,

    /// Aggregator weight configuration.
    pub aggregation: AggregationConfig,

    /// Global settings.
    pub global: GlobalConfig,
}

impl Default for MailSentryConfig {
    fn default() -> Self {
        Self {
            intel: IntelConfig::default(),
            features: FeaturesConfig::default(),
            aggregation: AggregationConfig::default(),
            global: GlobalConfig::default(),
        }
    }
}

/// Threat-intelligence store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelConfig {
    /// Path to the SQLite indicator database.
    pub db_path: PathBuf,

    /// LRU cache capacity fronting the store.
    pub cache_capacity: usize,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./mailsentry_intel.db"),
            cache_capacity: mailsentry_intel::DEFAULT_CAPACITY,
        }
    }
}

/// Feature builder configuration: where the fitted artefact lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Path to the persisted [`mailsentry_features::FeatureArtifact`].
    pub artifact_path: PathBuf,

    /// Maximum attachment payload size before hashing is skipped (§4.1).
    pub max_attachment_bytes: usize,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("./mailsentry_features.json"),
            max_attachment_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Aggregator weight configuration (§4.10, §6 "Configuration keys").
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub w_ml: f32,
    pub w_rules: f32,
    pub threshold: f32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { w_ml: 0.7, w_rules: 0.3, threshold: 0.5 }
    }
}

impl AggregationConfig {
    /// Loads weights from a JSON file, silently falling back to
    /// defaults if the file is missing, unreadable, or malformed (§6).
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let default = Self::default();
        let Ok(bytes) = std::fs::read(path) else { return default };
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) else { return default };

        let w_ml = value.get("w_ml").and_then(|v| v.as_f64()).map(|v| v as f32).unwrap_or(default.w_ml);
        let w_rules =
            value.get("w_rules").and_then(|v| v.as_f64()).map(|v| v as f32).unwrap_or(default.w_rules);
        let threshold =
            value.get("threshold").and_then(|v| v.as_f64()).map(|v| v as f32).unwrap_or(default.threshold);

        let mut config = Self { w_ml, w_rules, threshold };
        config.renormalize();
        config
    }

    /// Renormalises `w_ml`/`w_rules` to sum to 1 when their sum is
    /// positive and not already 1 (§4.10 step 3).
    pub fn renormalize(&mut self) {
        let sum = self.w_ml + self.w_rules;
        if sum > 0.0 && (sum - 1.0).abs() > f32::EPSILON {
            self.w_ml /= sum;
            self.w_rules /= sum;
        }
    }
}

/// Global MailSentry settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Whether a TI store I/O failure degrades analysis (treating
    /// `TIReputation` as empty) rather than aborting it (§7).
    pub degrade_on_ti_failure: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self { degrade_on_ti_failure: true }
    }
}
