//! Utilities (C1): text decoding, hostname/domain normalisation, timing.

use std::time::Instant;

/// Encodings tried in order when decoding header/body bytes whose charset
/// is unknown or whose declared charset fails to decode cleanly.
const ENCODING_CASCADE: &[&encoding_rs::Encoding] = &[
    encoding_rs::UTF_8,
    encoding_rs::WINDOWS_1251,
    encoding_rs::KOI8_R,
];

/// Decodes `bytes` trying `declared_charset` first (if given and known),
/// then the fixed UTF-8 → Windows-1251 → KOI8-R cascade, finally falling
/// back to lossy UTF-8. Never fails — decoding errors are replaced, not
/// raised, per §4.1.
pub fn decode_bytes(bytes: &[u8], declared_charset: Option<&str>) -> String {
    if let Some(label) = declared_charset {
        if let Some(enc) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (text, _, had_errors) = enc.decode(bytes);
            if !had_errors {
                return text.into_owned();
            }
        }
    }

    for enc in ENCODING_CASCADE {
        let (text, _, had_errors) = enc.decode(bytes);
        if !had_errors {
            return text.into_owned();
        }
    }

    encoding_rs::UTF_8.decode(bytes).0.into_owned()
}

/// Strips a single leading `www.` (case-insensitive) and lowercases.
pub fn normalize_hostname(host: &str) -> String {
    let host = host.trim();
    let lower = host.to_ascii_lowercase();
    lower.strip_prefix("www.").unwrap_or(&lower).to_string()
}

/// Validates an IPv4 dotted-quad with every octet in `0..=255`.
pub fn is_ipv4_literal(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts
        .iter()
        .all(|p| !p.is_empty() && p.len() <= 3 && p.parse::<u16>().map(|n| n <= 255).unwrap_or(false))
}

/// Whether `ip` falls in an RFC-1918 private range (10/8, 172.16/12,
/// 192.168/16). Arithmetic on the second octet, not a string prefix match,
/// so `172.16.0.0` through `172.31.255.255` are all covered.
pub fn is_private_ipv4(ip: &str) -> bool {
    let octets: Vec<u16> = ip.split('.').filter_map(|p| p.parse::<u16>().ok()).collect();
    if octets.len() != 4 {
        return false;
    }
    match octets[0] {
        10 => true,
        172 => (16..=31).contains(&octets[1]),
        192 => octets[1] == 168,
        _ => false,
    }
}

/// Runs `f`, logging its wall-clock duration at `tracing::debug!` under
/// `label`.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::debug!(stage = label, elapsed_us = start.elapsed().as_micros() as u64, "stage complete");
    result
}
