//! RFC-5322 header block parsing: unfolding, case-insensitive lookup, and
//! `Content-Type`/`Content-Disposition` parameter parsing.

use crate::util::decode_bytes;
use std::collections::HashMap;

/// One unfolded header as `(lowercase name, value)`, in delivery order.
#[derive(Debug, Clone)]
pub struct Headers(pub Vec<(String, String)>);

impl Headers {
    /// Parses an RFC-5322 header block (no body). Continuation lines
    /// (leading whitespace) are folded into the previous header's value.
    pub fn parse(block: &[u8]) -> Self {
        let text = decode_bytes(block, None);
        let mut fields: Vec<(String, String)> = Vec::new();
        for line in text.split(['\n']) {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some((_, value)) = fields.last_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
                continue;
            }
            if let Some(colon) = line.find(':') {
                let name = line[..colon].trim().to_ascii_lowercase();
                let value = line[colon + 1..].trim().to_string();
                if !name.is_empty() {
                    fields.push((name, value));
                }
            }
        }
        Headers(fields)
    }

    /// First value for `name` (case-insensitive), if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name` (case-insensitive), in delivery order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        let name = name.to_ascii_lowercase();
        self.0
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// A header value's leading token plus its `key=value` parameters, e.g.
/// `multipart/mixed; boundary="xyz"` → (`"multipart/mixed"`, `{"boundary": "xyz"}`).
pub fn parse_params(value: &str) -> (String, HashMap<String, String>) {
    let mut parts = value.split(';');
    let head = parts.next().unwrap_or("").trim().to_ascii_lowercase();
    let mut params = HashMap::new();
    for part in parts {
        let part = part.trim();
        if let Some(eq) = part.find('=') {
            let key = part[..eq].trim().trim_end_matches('*').to_ascii_lowercase();
            let mut val = part[eq + 1..].trim();
            if val.starts_with('"') && val.ends_with('"') && val.len() >= 2 {
                val = &val[1..val.len() - 1];
            }
            params.entry(key).or_insert_with(|| val.to_string());
        }
    }
    (head, params)
}

/// Extracts the registrable host out of an `@host` occurrence, lowercased.
pub fn first_at_host(value: &str) -> Option<String> {
    let idx = value.find('@')?;
    let rest = &value[idx + 1..];
    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, '>' | ',' | ';' | '"' | '\''))
        .unwrap_or(rest.len());
    let host = rest[..end].trim_matches(|c| c == '<' || c == '>');
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}
