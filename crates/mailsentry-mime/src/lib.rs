//! # mailsentry-mime
//!
//! RFC-5322/MIME extraction (C2): turns raw message bytes into a
//! [`CanonicalEmail`], plus the header (C1 decoding cascade, hostname
//! normalisation) and URL/domain/IP extraction helpers the rest of the
//! workspace builds on.
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes -> headers::Headers::parse -> multipart::walk (leaves)
//!           -> parse::EmailParser::parse -> CanonicalEmail
//! ```
//!
//! Text decoding falls back through a fixed UTF-8 -> Windows-1251 ->
//! KOI8-R cascade (`util::decode_bytes`) before giving up to lossy UTF-8,
//! matching the original Python implementation's encoding cascade.

mod error;
mod extract;
mod headers;
mod html;
mod mime_decode;
mod multipart;
mod parse;
mod types;
mod util;

pub use error::{ParseError, Result};
pub use extract::{extract_domains_ips, extract_urls, ip_hosts_in_urls};
pub use headers::{first_at_host, parse_params, Headers};
pub use html::{extract_attribute_urls, visible_text};
pub use mime_decode::{decode_payload, decode_quoted_printable};
pub use parse::{EmailParser, ParserConfig};
pub use types::{Attachment, AttachmentHash, CanonicalEmail, SKIPPED_TOO_LARGE};
pub use util::{decode_bytes, is_ipv4_literal, is_private_ipv4, normalize_hostname, timed};
