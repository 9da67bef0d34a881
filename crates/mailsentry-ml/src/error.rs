use thiserror::Error;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("no model loaded: call load() before classify()")]
    ModelNotLoaded,

    #[error("model artefact is corrupt or unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("filesystem error loading model artefact: {0}")]
    Io(#[from] std::io::Error),

    #[error("feature vector has {found} dimensions, model expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, MlError>;
