//! Content-Transfer-Encoding payload decoding.

/// Decodes a quoted-printable payload per RFC 2045 §6.7: `=XX` hex escapes
/// and trailing `=` soft line breaks are resolved; anything else passes
/// through unchanged.
pub fn decode_quoted_printable(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'=' if i + 2 < bytes.len() && bytes[i + 1] == b'\r' && bytes[i + 2] == b'\n' => {
                i += 3; // soft line break
            }
            b'=' if i + 1 < bytes.len() && bytes[i + 1] == b'\n' => {
                i += 2; // soft line break, bare LF
            }
            b'=' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(bytes[i]);
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

/// Decodes a MIME part payload according to its declared
/// `Content-Transfer-Encoding`. Unknown/absent encodings are treated as
/// `7bit`/`8bit` (raw bytes).
pub fn decode_payload(raw: &str, transfer_encoding: Option<&str>) -> Vec<u8> {
    use base64::Engine;

    match transfer_encoding.map(|s| s.to_ascii_lowercase()) {
        Some(ref enc) if enc == "base64" => {
            let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            base64::engine::general_purpose::STANDARD
                .decode(stripped.as_bytes())
                .unwrap_or_else(|_| raw.as_bytes().to_vec())
        }
        Some(ref enc) if enc == "quoted-printable" => decode_quoted_printable(raw),
        _ => raw.as_bytes().to_vec(),
    }
}
