//! The `MailSentry` facade: orchestrates C2–C10 behind
//! `analyze(raw_bytes) -> DecisionReport` and `update_ti(...)` (§6).

use crate::aggregator::aggregate_and_decide;
use crate::config::MailSentryConfig;
use crate::error::{MailSentryError, Result};
use crate::types::DecisionReport;

use mailsentry_features::{FeatureArtifact, FeatureBuilder, LexiconTranslator, TranslationEngine};
use mailsentry_intel::{FeedSource, ImportStats, TIReputation, ThreatIntelStore};
use mailsentry_mime::{EmailParser, ParserConfig};
use mailsentry_ml::{Classifier, InferenceEngine};
use mailsentry_rules::{analyze_headers, analyze_urls_domains, evaluate as evaluate_rules};

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// The unified MailSentry analysis facade.
///
/// Owns the three process-wide, long-lived resources §5 names as
/// shared-across-workers state: the threat-intelligence store, the
/// fitted feature artefact, and the loaded ML model. All three are
/// read-only (or internally synchronised) after construction, so a
/// `MailSentry` is safe to share behind an `Arc` across concurrent
/// analyses of disjoint messages.
pub struct MailSentry {
    config: MailSentryConfig,
    parser: EmailParser,
    intel: Arc<ThreatIntelStore>,
    artifact: Arc<FeatureArtifact>,
    translator: Arc<dyn TranslationEngine>,
    ml: Arc<InferenceEngine>,
}

impl MailSentry {
    /// Opens the TI store and loads the feature artefact named in
    /// `config`. The ML model is *not* loaded here — call
    /// [`Self::load_classifier`] before the first [`Self::analyze`],
    /// or it will fail with [`MailSentryError::ModelNotLoaded`] (§4.9).
    ///
    /// A missing feature-artefact file is not itself fatal at
    /// construction time (the facade may still be useful for TI/rule
    /// work), but `analyze` will fail with
    /// [`MailSentryError::ResourceUnavailable`] until a fitted artefact
    /// is loaded.
    pub fn new(config: MailSentryConfig) -> Result<Self> {
        let intel = ThreatIntelStore::open_with_capacity(&config.intel.db_path, config.intel.cache_capacity)?;

        let artifact = match FeatureArtifact::load(&config.features.artifact_path) {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!(error = %err, path = %config.features.artifact_path.display(), "feature artefact not loaded, analyze() will fail until one is");
                FeatureArtifact::default()
            }
        };

        let parser = EmailParser::new(ParserConfig {
            max_attachment_bytes: config.features.max_attachment_bytes,
            sentinel_on_oversized: true,
        });

        info!("MailSentry initialized");

        Ok(Self {
            config,
            parser,
            intel: Arc::new(intel),
            artifact: Arc::new(artifact),
            translator: Arc::new(LexiconTranslator),
            ml: Arc::new(InferenceEngine::new()),
        })
    }

    /// Installs `classifier` as the active ML model (§4.9). Safe to call
    /// again later to hot-swap models.
    pub fn load_classifier(&self, classifier: Arc<dyn Classifier>) {
        self.ml.load(classifier);
    }

    pub fn is_model_loaded(&self) -> bool {
        self.ml.is_loaded()
    }

    pub fn config(&self) -> &MailSentryConfig {
        &self.config
    }

    /// Runs the full pipeline (§2 data flow) over one message's raw
    /// bytes and returns the final [`DecisionReport`].
    pub fn analyze(&self, raw: &[u8]) -> Result<DecisionReport> {
        let email = self.parser.parse(raw)?;

        let facts = analyze_headers(&email);
        let url_flags = analyze_urls_domains(&email.urls, &email.domains);

        let reputation = self.check_reputation_degrading(&email.domains, &email.ips)?;

        let rules_result = evaluate_rules(&email, &facts, &url_flags, &reputation);

        let builder = FeatureBuilder::new(&self.artifact, self.translator.as_ref());
        let vector = builder.build(&email, &url_flags)?;

        let ml_result = self.ml.classify(&vector.combined)?;

        Ok(aggregate_and_decide(&ml_result, &rules_result, self.config.aggregation))
    }

    /// Checks TI reputation, degrading to an empty result on a store
    /// failure when `config.global.degrade_on_ti_failure` is set (§7),
    /// otherwise propagating [`MailSentryError::StoreIO`].
    fn check_reputation_degrading(&self, domains: &[String], ips: &[String]) -> Result<TIReputation> {
        match self.intel.check_reputation(domains, ips) {
            Ok(reputation) => Ok(reputation),
            Err(err) if self.config.global.degrade_on_ti_failure => {
                warn!(error = %err, "threat-intel lookup failed, degrading to empty reputation");
                Ok(TIReputation::empty())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Imports a threat-intelligence feed (§4.5, §6 `update_ti`). When
    /// `local_path` is given, reads feed bytes from disk instead of
    /// downloading; either way, ingestion clears the TI cache on success
    /// (§4.4).
    pub async fn update_ti(&self, source: FeedSource, local_path: Option<&Path>) -> Result<ImportStats> {
        let bytes = match local_path {
            Some(path) => std::fs::read(path).map_err(|e| MailSentryError::FeedParse(e.to_string()))?,
            None => mailsentry_intel::download_feed(source).await?,
        };

        let stats = match source {
            FeedSource::Urlhaus => mailsentry_intel::import_urlhaus_csv(&bytes, &self.intel)?,
            FeedSource::OpenPhish => mailsentry_intel::import_openphish_lines(&bytes, &self.intel)?,
        };

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsentry_ml::LinearMarginClassifier;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> MailSentryConfig {
        let mut config = MailSentryConfig::default();
        config.intel.db_path = dir.path().join("intel.db");
        config.features.artifact_path = dir.path().join("missing_artifact.json");
        config
    }

    #[test]
    fn new_succeeds_even_without_a_fitted_artefact_on_disk() {
        let dir = TempDir::new().unwrap();
        let sentinel = MailSentry::new(test_config(&dir)).unwrap();
        assert!(!sentinel.is_model_loaded());
    }

    #[test]
    fn analyze_fails_with_resource_unavailable_before_artefact_is_fitted() {
        let dir = TempDir::new().unwrap();
        let sentinel = MailSentry::new(test_config(&dir)).unwrap();
        sentinel.load_classifier(Arc::new(LinearMarginClassifier::new(Vec::new(), 0.0)));

        let raw = b"From: a@a.test\r\nSubject: hi\r\n\r\nbody";
        let err = sentinel.analyze(raw).unwrap_err();
        assert!(matches!(err, MailSentryError::ResourceUnavailable(_)));
    }

    #[test]
    fn analyze_fails_with_model_not_loaded_before_load_classifier() {
        let dir = TempDir::new().unwrap();
        let artifact_path = dir.path().join("artifact.json");
        let mut artifact = FeatureArtifact::default();
        artifact.vectorizer.fit(&["verify your account now".to_string(); 4]);
        artifact.scaler.fit(&[vec![0.0; 10], vec![10.0; 10]]);
        artifact.save(&artifact_path).unwrap();

        let mut config = test_config(&dir);
        config.features.artifact_path = artifact_path;
        let sentinel = MailSentry::new(config).unwrap();

        let raw = b"From: a@a.test\r\nSubject: hi\r\n\r\nbody";
        let err = sentinel.analyze(raw).unwrap_err();
        assert!(matches!(err, MailSentryError::ModelNotLoaded));
    }

    #[test]
    fn malformed_input_is_rejected_before_touching_any_resource() {
        let dir = TempDir::new().unwrap();
        let sentinel = MailSentry::new(test_config(&dir)).unwrap();
        let err = sentinel.analyze(b"not an email").unwrap_err();
        assert!(matches!(err, MailSentryError::MalformedInput(_)));
    }
}
