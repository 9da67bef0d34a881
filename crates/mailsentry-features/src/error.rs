use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("feature artefact is corrupt or unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("filesystem error loading feature artefact: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "feature artefact schema version mismatch: expected {expected}, found {found} (resource unavailable)"
    )]
    SchemaMismatch { expected: u32, found: u32 },

    #[error("vectoriser must be fitted before use")]
    VectorizerNotFitted,

    #[error("scaler must be fitted before use")]
    ScalerNotFitted,
}

pub type Result<T> = std::result::Result<T, FeatureError>;
