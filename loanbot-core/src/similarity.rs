//! String similarity for FAQ matching.
//!
//! Jaro-Winkler rewards a shared prefix and tolerates transposed characters,
//! which suits short, casually typed questions ("eligiblity kya hai").

/// Jaro-Winkler similarity in `[0, 1]`.
///
/// Two empty strings are identical (1.0); an empty string against a non-empty
/// one scores 0.0. Comparison is case sensitive, so callers lower-case
/// both sides first.
pub fn similarity(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => strsim::jaro_winkler(a, b),
    }
}

/// Canonical form of a stored phrasing: trimmed, lower-case.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
