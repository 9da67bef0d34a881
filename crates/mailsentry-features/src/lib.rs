//! # mailsentry-features
//!
//! The Translator (C6) and Feature Builder (C7): text normalisation,
//! an offline deterministic Russian→English lexicon translator, a
//! from-scratch TF-IDF vectoriser, the ten fixed synthetic features, a
//! `MinMaxScaler`, and versioned artefact persistence.

mod artifact;
mod builder;
mod error;
mod lexicon;
mod scaler;
mod synthetic;
mod text;
mod tfidf;
mod translate;
mod vector;

pub use artifact::{FeatureArtifact, CURRENT_SCHEMA_VERSION};
pub use builder::FeatureBuilder;
pub use error::{FeatureError, Result};
pub use scaler::MinMaxScaler;
pub use synthetic::{compute_synthetic_features, SYNTHETIC_LEN};
pub use text::preprocess;
pub use tfidf::{TfidfVectorizer, DEFAULT_MAX_FEATURES};
pub use translate::{detect_language, translate_text, LexiconTranslator, TranslationEngine};
pub use vector::FeatureVector;
