// Link normalization
//
// *Le Lien* (The Link) - Reference-link cleanup for catalog sources

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Conservative bare-domain shape: dotted labels with an alphabetic TLD,
/// optionally followed by a path.
static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*(\.[A-Za-z0-9][A-Za-z0-9-]*)*\.[A-Za-z]{2,}(/\S*)?$")
        .expect("domain pattern is valid")
});

/// Placeholder spellings that mean "no link", compared case-insensitively.
const NO_VALUE_PLACEHOLDERS: &[&str] = &["n/a", "na", "-", "none", "null"];

/// Normalize a raw link cell from a catalog source.
///
/// Accepts `http://` and `https://` URLs as-is, auto-prefixes `https://`
/// onto `www.`-style and bare-domain values, and maps empty or placeholder
/// cells to `None`. Values that fit none of these shapes are dropped with a
/// warning rather than kept as bogus links.
pub fn normalize_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_ascii_lowercase();
    if NO_VALUE_PLACEHOLDERS.contains(&lowered.as_str()) {
        return None;
    }

    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Some(trimmed.to_string());
    }

    if lowered.starts_with("www.") {
        return Some(format!("https://{trimmed}"));
    }

    if DOMAIN_RE.is_match(trimmed) {
        return Some(format!("https://{trimmed}"));
    }

    warn!("Dropping unrecognized link value: {trimmed}");
    None
}
