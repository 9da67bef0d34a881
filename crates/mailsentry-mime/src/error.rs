use thiserror::Error;

/// Errors raised while turning raw message bytes into a [`crate::CanonicalEmail`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("message has no parsable RFC-5322 headers")]
    Malformed,

    #[error("attachment {name:?} ({size} bytes) exceeds the configured size cap")]
    TooLarge { name: String, size: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
