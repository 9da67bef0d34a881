//! MIME multipart body splitting: recursively walks a message body down to
//! its leaf parts (the ones actually carrying text, HTML, or an
//! attachment payload), resolving nested `multipart/*` containers along
//! the way (e.g. `multipart/mixed` wrapping a `multipart/alternative`).

use crate::headers::{parse_params, Headers};

/// A single non-multipart leaf: its own headers and raw (still
/// transfer-encoded) body bytes.
pub struct Leaf {
    pub headers: Headers,
    pub body: Vec<u8>,
}

/// Splits `block` into `(headers, body)` at the first blank line, per
/// RFC 5322. If no blank line is found the whole block is treated as
/// headers with an empty body.
fn split_headers_body(block: &[u8]) -> (&[u8], &[u8]) {
    let mut i = 0;
    while i + 1 < block.len() {
        if block[i] == b'\n' {
            // bare LF blank line
            if i + 1 < block.len() && block[i + 1] == b'\n' {
                return (&block[..i], &block[i + 2..]);
            }
        }
        if i + 3 < block.len() && &block[i..i + 4] == b"\r\n\r\n" {
            return (&block[..i], &block[i + 4..]);
        }
        i += 1;
    }
    (block, &[])
}

/// Splits a multipart body on `--boundary` delimiter lines. Preamble
/// (before the first delimiter) and epilogue (after the closing
/// `--boundary--`) are discarded, matching how mail clients render
/// multipart bodies.
fn split_on_boundary<'a>(body: &'a [u8], boundary: &str) -> Vec<&'a [u8]> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let mut parts = Vec::new();
    let mut search_from = 0usize;

    let Some(first) = find(body, delimiter, search_from) else {
        return parts;
    };
    search_from = first + delimiter.len();

    loop {
        let Some(next) = find(body, delimiter, search_from) else {
            break;
        };
        let segment = trim_leading_newline(&body[search_from..next]);
        if !segment.is_empty() {
            parts.push(segment);
        }
        // Closing delimiter is `--boundary--`.
        if next + delimiter.len() + 1 < body.len() && &body[next + delimiter.len()..next + delimiter.len() + 2] == b"--"
        {
            break;
        }
        search_from = next + delimiter.len();
    }

    parts
}

fn trim_leading_newline(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    if bytes.first() == Some(&b'\r') {
        start += 1;
    }
    if bytes.get(start) == Some(&b'\n') {
        start += 1;
    }
    &bytes[start..]
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Recursively descends into `multipart/*` containers, collecting every
/// non-multipart leaf part. A non-multipart top-level message yields a
/// single leaf.
pub fn walk_leaves(headers: Headers, body: &[u8], leaves: &mut Vec<Leaf>) {
    let content_type = headers.get("content-type").unwrap_or("text/plain");
    let (mime_type, params) = parse_params(content_type);

    if let Some(boundary) = mime_type
        .starts_with("multipart/")
        .then(|| params.get("boundary").cloned())
        .flatten()
    {
        for part_bytes in split_on_boundary(body, &boundary) {
            let (part_headers, part_body) = split_headers_body(part_bytes);
            walk_leaves(Headers::parse(part_headers), part_body, leaves);
        }
        return;
    }

    leaves.push(Leaf {
        headers,
        body: body.to_vec(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_two_part_multipart() {
        let body = b"preamble\r\n--BOUND\r\nContent-Type: text/plain\r\n\r\nhello\r\n--BOUND\r\nContent-Type: text/html\r\n\r\n<p>hi</p>\r\n--BOUND--\r\nepilogue";
        let headers = Headers::parse(b"Content-Type: multipart/alternative; boundary=BOUND\r\n");
        let mut leaves = Vec::new();
        walk_leaves(headers, body, &mut leaves);
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].headers.get("content-type"), Some("text/plain"));
        assert_eq!(leaves[1].headers.get("content-type"), Some("text/html"));
    }

    #[test]
    fn non_multipart_message_is_a_single_leaf() {
        let headers = Headers::parse(b"Content-Type: text/plain\r\n");
        let mut leaves = Vec::new();
        walk_leaves(headers, b"just a body", &mut leaves);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].body, b"just a body");
    }

    #[test]
    fn nested_multipart_is_flattened() {
        let inner = b"--INNER\r\nContent-Type: text/plain\r\n\r\nplain body\r\n--INNER\r\nContent-Type: text/html\r\n\r\n<b>html</b>\r\n--INNER--\r\n";
        let outer = format!(
            "--OUTER\r\nContent-Type: multipart/alternative; boundary=INNER\r\n\r\n{}--OUTER\r\nContent-Type: application/pdf\r\nContent-Disposition: attachment; filename=\"a.pdf\"\r\n\r\n%PDF-DATA\r\n--OUTER--\r\n",
            String::from_utf8_lossy(inner)
        );
        let headers = Headers::parse(b"Content-Type: multipart/mixed; boundary=OUTER\r\n");
        let mut leaves = Vec::new();
        walk_leaves(headers, outer.as_bytes(), &mut leaves);
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[2].headers.get("content-disposition"), Some("attachment; filename=\"a.pdf\""));
    }
}
