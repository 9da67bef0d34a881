//! Error taxonomy for the MailSentry facade (§6, §7): the five tagged
//! result variants the public API promises, each a thin rollup over the
//! sibling crates' own `thiserror` enums.

use thiserror::Error;

/// Facade-level error, matching §6's tagged taxonomy
/// (`ErrMalformedInput`/`ErrTooLarge`/`ErrResourceUnavailable`/
/// `ErrModelNotLoaded`/`ErrFeedParse`/`ErrStoreIO`).
#[derive(Debug, Error)]
pub enum MailSentryError {
    /// The message decoded to no parsable RFC-5322 headers (§4.1, §7).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An attachment exceeded the size cap and the sentinel fallback
    /// was disabled (§4.1).
    #[error("attachment too large: {0}")]
    TooLarge(String),

    /// A resource the pipeline depends on (feature artefact, TI store)
    /// is absent or unusable; analysis degrades rather than aborting
    /// where §7 allows it (TI), and is fatal where it does not
    /// (un-fitted feature artefact).
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// `classify()` was called before `load()` installed a model (§4.9,
    /// §7) — always fatal.
    #[error("model not loaded")]
    ModelNotLoaded,

    /// A threat-intelligence feed failed to parse (§4.5, §6).
    #[error("feed parse error: {0}")]
    FeedParse(String),

    /// The threat-intelligence store's underlying SQL engine errored
    /// (§4.4, §6).
    #[error("threat-intel store i/o error: {0}")]
    StoreIO(String),
}

pub type Result<T> = std::result::Result<T, MailSentryError>;

impl From<mailsentry_mime::ParseError> for MailSentryError {
    fn from(err: mailsentry_mime::ParseError) -> Self {
        match err {
            mailsentry_mime::ParseError::Malformed => {
                MailSentryError::MalformedInput(err.to_string())
            }
            mailsentry_mime::ParseError::TooLarge { .. } => {
                MailSentryError::TooLarge(err.to_string())
            }
        }
    }
}

impl From<mailsentry_intel::StoreError> for MailSentryError {
    fn from(err: mailsentry_intel::StoreError) -> Self {
        match err {
            mailsentry_intel::StoreError::FeedParse(_) => MailSentryError::FeedParse(err.to_string()),
            mailsentry_intel::StoreError::Io(_) | mailsentry_intel::StoreError::Network(_) => {
                MailSentryError::StoreIO(err.to_string())
            }
        }
    }
}

impl From<mailsentry_features::FeatureError> for MailSentryError {
    fn from(err: mailsentry_features::FeatureError) -> Self {
        MailSentryError::ResourceUnavailable(err.to_string())
    }
}

impl From<mailsentry_ml::MlError> for MailSentryError {
    fn from(err: mailsentry_ml::MlError) -> Self {
        // §4.9: model-load failure and per-vector inference failure are
        // both fatal for the message; a dimension mismatch indicates the
        // loaded model and artefact disagree on vector shape, which is
        // equally unrecoverable for this message.
        if !matches!(err, mailsentry_ml::MlError::ModelNotLoaded) {
            tracing::warn!(error = %err, "ml inference error");
        }
        MailSentryError::ModelNotLoaded
    }
}
