//! Domain normalisation ahead of a TI lookup (§4.4): reduce to the
//! registrable `domain.publicsuffix`, lowercased.

/// Reduces `host` to its registrable domain (e.g. `mail.sub.evil.co.uk`
/// -> `evil.co.uk`), lowercased. Falls back to the lowercased input when
/// the public-suffix list has no opinion (e.g. the host is already bare,
/// or uses an unlisted suffix).
pub fn registrable_domain(host: &str) -> String {
    let lower = host.trim().to_ascii_lowercase();
    psl::domain_str(&lower).map(str::to_string).unwrap_or(lower)
}
