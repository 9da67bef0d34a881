//! # mailsentry-ml
//!
//! ML Inference Adapter (C9): a `Classifier` capability trait replacing
//! the original's duck-typed model object, a stats-tracked loader
//! wrapper, and the margin→probability sigmoid fallback.

mod engine;
mod error;
mod model;
mod types;

pub use engine::{InferenceEngine, InferenceStats};
pub use error::{MlError, Result};
pub use model::{stable_sigmoid, Classifier, LinearMarginClassifier};
pub use types::MLResult;
