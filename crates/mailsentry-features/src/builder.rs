//! Feature Builder (C7) top-level entry point: ties text preprocessing,
//! translation, TF-IDF vectorisation, synthetic features, and scaling
//! into one [`FeatureVector`] per message.

use crate::artifact::FeatureArtifact;
use crate::error::{FeatureError, Result};
use crate::synthetic::compute_synthetic_features;
use crate::text::combine_subject_body;
use crate::translate::{translate_text, TranslationEngine};
use crate::vector::FeatureVector;
use mailsentry_mime::CanonicalEmail;
use mailsentry_rules::UrlDomainFlags;

/// Builds [`FeatureVector`]s against a fitted [`FeatureArtifact`] and a
/// [`TranslationEngine`]. Read-only after construction; safe to share
/// across concurrent analyses (§5).
pub struct FeatureBuilder<'a> {
    artifact: &'a FeatureArtifact,
    translator: &'a dyn TranslationEngine,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(artifact: &'a FeatureArtifact, translator: &'a dyn TranslationEngine) -> Self {
        Self { artifact, translator }
    }

    /// Builds the combined feature vector for one message. Requires
    /// both the vectoriser and the scaler to be fitted.
    pub fn build(&self, email: &CanonicalEmail, url_flags: &UrlDomainFlags) -> Result<FeatureVector> {
        if !self.artifact.vectorizer.is_fitted() {
            return Err(FeatureError::VectorizerNotFitted);
        }
        if !self.artifact.scaler.is_fitted() {
            return Err(FeatureError::ScalerNotFitted);
        }

        let subject = email.subject.as_deref().unwrap_or("");
        let raw_text = combine_subject_body(subject, email.effective_body());
        let translated = translate_text(&raw_text, self.translator);

        let tfidf = self.artifact.vectorizer.transform(&translated);
        let raw_synthetic = compute_synthetic_features(email, url_flags, &translated);
        let scaled_synthetic = self.artifact.scaler.transform(&raw_synthetic);

        Ok(FeatureVector::new(tfidf, scaled_synthetic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::LexiconTranslator;

    fn fitted_artifact() -> FeatureArtifact {
        let mut artifact = FeatureArtifact::default();
        artifact.vectorizer.fit(&[
            "verify your account immediately".to_string(),
            "verify your account now urgent".to_string(),
            "please verify your account today".to_string(),
        ]);
        artifact.scaler.fit(&[vec![0.0; 10], vec![10.0; 10]]);
        artifact
    }

    #[test]
    fn errors_when_vectorizer_not_fitted() {
        let artifact = FeatureArtifact::default();
        let builder = FeatureBuilder::new(&artifact, &LexiconTranslator);
        let result = builder.build(&CanonicalEmail::default(), &UrlDomainFlags::default());
        assert!(matches!(result, Err(FeatureError::VectorizerNotFitted)));
    }

    #[test]
    fn builds_combined_vector_of_expected_length() {
        let artifact = fitted_artifact();
        let builder = FeatureBuilder::new(&artifact, &LexiconTranslator);
        let email = CanonicalEmail {
            subject: Some("Verify your account".to_string()),
            body_plain: Some("please verify your account immediately".to_string()),
            ..Default::default()
        };
        let vector = builder.build(&email, &UrlDomainFlags::default()).unwrap();
        assert_eq!(vector.len(), vector.tfidf.len() + vector.synthetic.len());
        assert_eq!(vector.synthetic.len(), crate::synthetic::SYNTHETIC_LEN);
    }
}
