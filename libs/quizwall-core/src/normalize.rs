//! Whitespace normalization for scraped text.

/// Trim and collapse every whitespace run to a single space.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
