//! TF-IDF vectoriser (§4.7 "Vectoriser"): unigrams+bigrams,
//! `min_df=3`/`max_df=0.3` vocabulary pruning, sublinear TF, L2 norm.
//!
//! A small, self-contained implementation of the documented
//! fit/transform algorithm against `ndarray`.

use crate::text::{preprocess, TOKEN_RE};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default cap on vocabulary size (§4.7).
pub const DEFAULT_MAX_FEATURES: usize = 3000;
const MIN_DF: usize = 3;
const MAX_DF_RATIO: f32 = 0.3;

fn tokenize(processed: &str) -> Vec<String> {
    TOKEN_RE.find_iter(processed).map(|m| m.as_str().to_string()).collect()
}

fn ngrams(tokens: &[String]) -> Vec<String> {
    let mut grams: Vec<String> = tokens.to_vec();
    for window in tokens.windows(2) {
        grams.push(format!("{} {}", window[0], window[1]));
    }
    grams
}

/// A fitted (or not-yet-fitted) TF-IDF vectoriser. Serialisable so it can
/// live inside a persisted [`crate::artifact::FeatureArtifact`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    /// term -> (column index, idf weight). Empty until [`Self::fit`].
    vocabulary: HashMap<String, (usize, f32)>,
    is_fitted: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features, vocabulary: HashMap::new(), is_fitted: false }
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Builds the vocabulary and IDF weights from a training corpus of
    /// raw (unpreprocessed) texts.
    pub fn fit(&mut self, texts: &[String]) {
        let n_docs = texts.len().max(1);
        let processed: Vec<Vec<String>> = texts.iter().map(|t| ngrams(&tokenize(&preprocess(t)))).collect();

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in &processed {
            let unique: std::collections::HashSet<&String> = doc.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let max_df_count = (MAX_DF_RATIO * n_docs as f32).ceil() as usize;
        let mut candidates: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= MIN_DF && *df <= max_df_count.max(MIN_DF))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        candidates.truncate(self.max_features);

        let mut vocabulary = HashMap::new();
        for (index, (term, df)) in candidates.into_iter().enumerate() {
            // smooth IDF, matching scikit-learn's smooth_idf=True default.
            let idf = ((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0;
            vocabulary.insert(term, (index, idf));
        }

        self.vocabulary = vocabulary;
        self.is_fitted = true;
    }

    /// Transforms one document into its (dense) TF-IDF row, sublinear-TF
    /// weighted and L2-normalised. Returns a zero vector if called
    /// before [`Self::fit`].
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let dim = self.vocabulary.len();
        let mut row = Array1::<f32>::zeros(dim);
        if !self.is_fitted || dim == 0 {
            return row;
        }

        let grams = ngrams(&tokenize(&preprocess(text)));
        let mut term_counts: HashMap<&str, u32> = HashMap::new();
        for term in &grams {
            *term_counts.entry(term.as_str()).or_insert(0) += 1;
        }

        for (term, count) in term_counts {
            if let Some((index, idf)) = self.vocabulary.get(term) {
                // sublinear TF: 1 + ln(tf)
                let tf = 1.0 + (count as f32).ln();
                row[*index] = tf * idf;
            }
        }

        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row /= norm;
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "verify your account immediately urgent action required".to_string(),
            "verify your account now before it is suspended".to_string(),
            "please verify your account to avoid suspension".to_string(),
            "meeting notes for tomorrow project review".to_string(),
        ]
    }

    #[test]
    fn fit_populates_vocabulary_within_min_max_df() {
        let mut vectorizer = TfidfVectorizer::new(50);
        vectorizer.fit(&corpus());
        assert!(vectorizer.is_fitted());
        // "verify" and "account" appear in exactly 3 of 4 docs, meeting min_df=3.
        assert!(vectorizer.vocabulary.contains_key("verify"));
        assert!(vectorizer.vocabulary.contains_key("account"));
    }

    #[test]
    fn transform_before_fit_is_zero_vector() {
        let vectorizer = TfidfVectorizer::new(50);
        let row = vectorizer.transform("verify your account");
        assert_eq!(row.len(), 0);
    }

    #[test]
    fn transformed_rows_are_l2_normalised() {
        let mut vectorizer = TfidfVectorizer::new(50);
        vectorizer.fit(&corpus());
        let row = vectorizer.transform("verify your account immediately");
        let norm = row.dot(&row).sqrt();
        assert!(norm < 1.0001);
        if row.iter().any(|v| *v != 0.0) {
            assert!((norm - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn vocabulary_respects_max_features_cap() {
        let mut vectorizer = TfidfVectorizer::new(1);
        vectorizer.fit(&corpus());
        assert!(vectorizer.vocabulary_size() <= 1);
    }
}
