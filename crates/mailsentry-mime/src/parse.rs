//! The top-level entry point for C2: [`EmailParser::parse`] turns raw
//! message bytes into a [`CanonicalEmail`].

use crate::error::{ParseError, Result};
use crate::headers::{parse_params, Headers};
use crate::mime_decode::decode_payload;
use crate::multipart::{walk_leaves, Leaf};
use crate::types::{Attachment, AttachmentHash, CanonicalEmail};
use crate::util::decode_bytes;
use crate::{extract, util};
use sha2::{Digest, Sha256};

/// Tunables for [`EmailParser`]. Everything here is a cap or a policy
/// switch, never a correctness knob — the extraction semantics
/// themselves are fixed by spec.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// Attachments whose decoded payload exceeds this many bytes are not
    /// hashed; see `sentinel_on_oversized`.
    pub max_attachment_bytes: usize,
    /// When true (default), an oversized attachment is recorded with the
    /// `"skipped_too_large"` sentinel hash. When false, parsing fails
    /// with [`ParseError::TooLarge`] instead.
    pub sentinel_on_oversized: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_attachment_bytes: 25 * 1024 * 1024,
            sentinel_on_oversized: true,
        }
    }
}

/// Parses raw RFC-5322/MIME message bytes into a [`CanonicalEmail`].
pub struct EmailParser {
    config: ParserConfig,
}

impl EmailParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parses `raw` per §4.1. Fails with [`ParseError::Malformed`] when
    /// no headers can be recovered.
    pub fn parse(&self, raw: &[u8]) -> Result<CanonicalEmail> {
        util::timed("mime_parse", || self.parse_inner(raw))
    }

    fn parse_inner(&self, raw: &[u8]) -> Result<CanonicalEmail> {
        let split_at = find_header_body_split(raw);
        let (header_bytes, body_bytes) = match split_at {
            Some(idx) => (&raw[..idx.0], &raw[idx.1..]),
            None => (raw, &[][..]),
        };
        let headers = Headers::parse(header_bytes);
        if headers.0.is_empty() {
            return Err(ParseError::Malformed);
        }

        let mut leaves = Vec::new();
        walk_leaves(headers.clone(), body_bytes, &mut leaves);

        let mut body_plain = None;
        let mut body_html = None;
        let mut attachments = Vec::new();

        for leaf in leaves {
            if self.is_attachment(&leaf) {
                attachments.push(self.build_attachment(&leaf)?);
                continue;
            }

            let content_type = leaf.headers.get("content-type").unwrap_or("text/plain");
            let (mime_type, params) = parse_params(content_type);
            let charset = params.get("charset").map(String::as_str);
            let transfer_encoding = leaf.headers.get("content-transfer-encoding");
            // base64/quoted-printable are pure-ASCII wire encodings, so
            // decoding the leaf bytes as us-ascii first is safe; for
            // 7bit/8bit/no declared encoding the leaf bytes already are
            // the charset-cascade payload and must only be decoded once,
            // same as `build_attachment` below.
            let payload = match transfer_encoding.map(|s| s.to_ascii_lowercase()) {
                Some(ref enc) if enc == "base64" || enc == "quoted-printable" => {
                    let ascii_body = decode_bytes(&leaf.body, Some("us-ascii"));
                    decode_payload(&ascii_body, transfer_encoding)
                }
                _ => leaf.body.clone(),
            };
            let text = decode_bytes(&payload, charset);

            if mime_type == "text/plain" && body_plain.is_none() {
                body_plain = Some(text);
            } else if mime_type == "text/html" && body_html.is_none() {
                body_html = Some(text);
            }
        }

        let urls = extract::extract_urls(body_plain.as_deref(), body_html.as_deref());
        let received_headers: Vec<String> = headers
            .get_all("received")
            .into_iter()
            .map(str::to_string)
            .collect();

        let from = headers.get("from").map(str::to_string);
        let to = headers.get("to").map(str::to_string);
        let reply_to = headers.get("reply-to").map(str::to_string);
        let return_path = headers.get("return-path").map(str::to_string);

        let address_headers = [from.as_deref(), to.as_deref(), reply_to.as_deref(), return_path.as_deref()];
        let (domains, ips) = extract::extract_domains_ips(&urls, &address_headers, &received_headers);

        Ok(CanonicalEmail {
            from,
            to,
            reply_to,
            return_path,
            subject: headers.get("subject").map(str::to_string),
            date: headers.get("date").map(str::to_string),
            message_id: headers.get("message-id").map(str::to_string),
            references: headers.get("references").map(str::to_string),
            body_plain,
            body_html,
            auth_results: headers.get("authentication-results").map(str::to_string),
            received_headers,
            attachments,
            urls,
            domains,
            ips,
        })
    }

    fn is_attachment(&self, leaf: &Leaf) -> bool {
        leaf.headers
            .get("content-disposition")
            .map(|v| v.to_ascii_lowercase().contains("attachment"))
            .unwrap_or(false)
    }

    fn build_attachment(&self, leaf: &Leaf) -> Result<Attachment> {
        let content_type = leaf.headers.get("content-type").unwrap_or("application/octet-stream");
        let (mime_type, ct_params) = parse_params(content_type);

        let disposition = leaf.headers.get("content-disposition").unwrap_or("");
        let (_, disp_params) = parse_params(disposition);
        let name = disp_params
            .get("filename")
            .or_else(|| ct_params.get("name"))
            .cloned()
            .unwrap_or_else(|| "unnamed".to_string());

        // base64/quoted-printable wire encodings are themselves pure
        // ASCII, so decoding the leaf bytes as us-ascii first is safe;
        // for 7bit/8bit/binary (or no declared encoding) the leaf bytes
        // already *are* the payload and must be hashed untouched, since
        // routing raw binary through a lossy text decode would corrupt
        // it before hashing.
        let transfer_encoding = leaf.headers.get("content-transfer-encoding");
        let payload = match transfer_encoding.map(|s| s.to_ascii_lowercase()) {
            Some(ref enc) if enc == "base64" || enc == "quoted-printable" => {
                let ascii_body = decode_bytes(&leaf.body, Some("us-ascii"));
                decode_payload(&ascii_body, transfer_encoding)
            }
            _ => leaf.body.clone(),
        };
        let size = payload.len();

        let sha256 = if size > self.config.max_attachment_bytes {
            if !self.config.sentinel_on_oversized {
                return Err(ParseError::TooLarge { name, size });
            }
            AttachmentHash::SkippedTooLarge
        } else {
            let mut hasher = Sha256::new();
            hasher.update(&payload);
            AttachmentHash::Sha256(hex::encode(hasher.finalize()))
        };

        Ok(Attachment {
            name,
            content_type: mime_type,
            size,
            sha256,
        })
    }
}

impl Default for EmailParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Finds the byte offset of the header/body separator (first blank
/// line), returning `(header_end, body_start)`.
fn find_header_body_split(raw: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'\n' {
            if i > 0 && raw[i - 1] == b'\r' {
                if i + 2 < raw.len() && raw[i + 1] == b'\r' && raw[i + 2] == b'\n' {
                    return Some((i - 1, i + 3));
                }
                if i + 1 < raw.len() && raw[i + 1] == b'\n' {
                    return Some((i - 1, i + 2));
                }
            } else if i + 1 < raw.len() && raw[i + 1] == b'\n' {
                return Some((i, i + 2));
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bytes_with_no_headers_error() {
        let parser = EmailParser::default();
        let err = parser.parse(b"not an email at all, just prose").unwrap_err();
        assert!(matches!(err, ParseError::Malformed));
    }

    #[test]
    fn parses_simple_plaintext_message() {
        let raw = b"From: alice@example.com\r\nTo: bob@example.com\r\nSubject: hi\r\nDate: Mon, 1 Jan 2024 00:00:00 +0000\r\n\r\nmeeting tomorrow at 10";
        let parser = EmailParser::default();
        let email = parser.parse(raw).unwrap();
        assert_eq!(email.from.as_deref(), Some("alice@example.com"));
        assert_eq!(email.body_plain.as_deref(), Some("meeting tomorrow at 10"));
        assert!(email.domains.contains(&"example.com".to_string()));
    }

    #[test]
    fn parses_multipart_alternative_with_attachment() {
        let raw = b"From: a@a.test\r\nSubject: test\r\nContent-Type: multipart/mixed; boundary=XYZ\r\n\r\n--XYZ\r\nContent-Type: multipart/alternative; boundary=ABC\r\n\r\n--ABC\r\nContent-Type: text/plain\r\n\r\nplain text here\r\n--ABC\r\nContent-Type: text/html\r\n\r\n<p>html <a href=\"http://evil.test/x\">link</a></p>\r\n--ABC--\r\n--XYZ\r\nContent-Type: application/octet-stream\r\nContent-Disposition: attachment; filename=\"bad.exe\"\r\nContent-Transfer-Encoding: base64\r\n\r\naGVsbG8=\r\n--XYZ--\r\n";
        let parser = EmailParser::default();
        let email = parser.parse(raw).unwrap();
        assert_eq!(email.body_plain.as_deref(), Some("plain text here"));
        assert!(email.body_html.as_ref().unwrap().contains("html"));
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(email.attachments[0].name, "bad.exe");
        assert!(matches!(email.attachments[0].sha256, AttachmentHash::Sha256(_)));
        assert!(email.urls.iter().any(|u| u.contains("evil.test")));
        assert!(email.domains.contains(&"evil.test".to_string()));
    }

    #[test]
    fn oversized_attachment_gets_sentinel_hash_by_default() {
        let raw_body = "aGVsbG8=".repeat(1); // tiny payload, but cap is set to 0 below
        let raw = format!(
            "From: a@a.test\r\nContent-Type: application/octet-stream\r\nContent-Disposition: attachment; filename=\"big.bin\"\r\nContent-Transfer-Encoding: base64\r\n\r\n{raw_body}\r\n"
        );
        let parser = EmailParser::new(ParserConfig {
            max_attachment_bytes: 0,
            sentinel_on_oversized: true,
        });
        let email = parser.parse(raw.as_bytes()).unwrap();
        assert_eq!(email.attachments.len(), 1);
        assert!(matches!(email.attachments[0].sha256, AttachmentHash::SkippedTooLarge));
    }

    #[test]
    fn raw_binary_attachment_without_base64_hashes_the_exact_bytes() {
        // No Content-Transfer-Encoding declared: the leaf body octets
        // are the payload verbatim, including bytes invalid as UTF-8,
        // and must be hashed without going through a lossy text decode.
        let mut raw = b"From: a@a.test\r\nContent-Type: application/octet-stream\r\nContent-Disposition: attachment; filename=\"raw.bin\"\r\n\r\n".to_vec();
        let payload = vec![0xff, 0xfe, 0x00, 0x41, 0x80, 0x81];
        raw.extend_from_slice(&payload);

        let parser = EmailParser::default();
        let email = parser.parse(&raw).unwrap();
        assert_eq!(email.attachments.len(), 1);

        let mut hasher = Sha256::new();
        hasher.update(&payload);
        let expected = hex::encode(hasher.finalize());
        assert_eq!(email.attachments[0].sha256, AttachmentHash::Sha256(expected));
    }

    #[test]
    fn windows_1251_plain_body_with_no_transfer_encoding_decodes_once() {
        // "Привет" (hello) in windows-1251, no Content-Transfer-Encoding
        // declared: the leaf bytes are the final charset-cascade payload
        // and must be decoded exactly once, not re-encoded to UTF-8 and
        // decoded a second time as windows-1251 (which would produce
        // mojibake instead of "had_errors" tripping, since single-byte
        // encodings never fail on arbitrary bytes).
        let body: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let mut raw = b"From: a@a.test\r\nSubject: hi\r\nContent-Type: text/plain; charset=windows-1251\r\n\r\n".to_vec();
        raw.extend_from_slice(body);

        let parser = EmailParser::default();
        let email = parser.parse(&raw).unwrap();
        assert_eq!(email.body_plain.as_deref(), Some("Привет"));
    }

    #[test]
    fn oversized_attachment_errors_when_sentinel_disabled() {
        let raw = b"From: a@a.test\r\nContent-Type: application/octet-stream\r\nContent-Disposition: attachment; filename=\"big.bin\"\r\n\r\nsome payload bytes";
        let parser = EmailParser::new(ParserConfig {
            max_attachment_bytes: 1,
            sentinel_on_oversized: false,
        });
        let err = parser.parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { .. }));
    }
}
