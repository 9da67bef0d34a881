use serde::{Deserialize, Serialize};

/// Sentinel value written for attachments whose payload exceeded the
/// configured size cap: the hash is never computed for them.
pub const SKIPPED_TOO_LARGE: &str = "skipped_too_large";

/// The SHA-256 of an attachment's decoded payload, or a marker that hashing
/// was skipped because the payload exceeded the configured cap.
///
/// Serialises to a plain string so callers who only care about the wire
/// format (spec's `sha256` field) see exactly `"skipped_too_large"` or the
/// hex digest, never a tagged enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentHash {
    Sha256(String),
    SkippedTooLarge,
}

impl AttachmentHash {
    pub fn as_str(&self) -> &str {
        match self {
            AttachmentHash::Sha256(digest) => digest,
            AttachmentHash::SkippedTooLarge => SKIPPED_TOO_LARGE,
        }
    }
}

impl Serialize for AttachmentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttachmentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == SKIPPED_TOO_LARGE {
            AttachmentHash::SkippedTooLarge
        } else {
            AttachmentHash::Sha256(raw)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub size: usize,
    pub sha256: AttachmentHash,
}

/// Canonical, fully-parsed form of one email message. Produced once per
/// message by [`crate::EmailParser::parse`] and read-only thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalEmail {
    pub from: Option<String>,
    pub to: Option<String>,
    pub reply_to: Option<String>,
    pub return_path: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
    pub message_id: Option<String>,
    pub references: Option<String>,
    pub body_plain: Option<String>,
    pub body_html: Option<String>,
    pub auth_results: Option<String>,
    /// `Received` headers, newest-first as delivered, unmodified.
    pub received_headers: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub urls: Vec<String>,
    pub domains: Vec<String>,
    pub ips: Vec<String>,
}

impl CanonicalEmail {
    /// `body_plain` when present, else `body_html`, else empty — the
    /// "effective body" used for length/linguistic features (§4.7).
    pub fn effective_body(&self) -> &str {
        self.body_plain
            .as_deref()
            .or(self.body_html.as_deref())
            .unwrap_or("")
    }
}
