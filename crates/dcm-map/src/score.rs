//! Name similarity scoring.
//!
//! Comparisons run on trimmed, lower-cased strings and fall through four
//! tiers, each strictly weaker than the one before:
//!
//! 1. exact match (`1.0`)
//! 2. match after naive singularization (`0.95`)
//! 3. substring containment, scaled by the length ratio (`0.1..0.9`)
//! 4. indel (longest-common-subsequence) ratio from `rapidfuzz`

use rapidfuzz::distance::indel;

/// Score for names that only differ by a plural suffix.
pub const SINGULAR_MATCH_SCORE: f64 = 0.95;
const CONTAINMENT_SCALE: f64 = 0.8;
const CONTAINMENT_BASE: f64 = 0.1;

/// Similarity of two names in `[0, 1]`.
///
/// Symmetric, `1.0` for identical names and `0.0` when exactly one side is
/// empty.
pub fn similarity(source: &str, target: &str) -> f64 {
    let a = normalize(source);
    let b = normalize(target);
    similarity_normalized(&a, &b)
}

/// [`similarity`] on strings already trimmed and lower-cased.
pub(crate) fn similarity_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if singularize(a) == singularize(b) {
        return SINGULAR_MATCH_SCORE;
    }
    if a.contains(b) || b.contains(a) {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        let ratio = len_a.min(len_b) as f64 / len_a.max(len_b) as f64;
        return CONTAINMENT_SCALE * ratio + CONTAINMENT_BASE;
    }
    indel::normalized_similarity(a.chars(), b.chars())
}

/// Strip a naive plural suffix: `ies` becomes `y`, a trailing `s` is dropped
/// from words longer than three characters.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if word.chars().count() > 3
        && let Some(stem) = word.strip_suffix('s')
    {
        return stem.to_string();
    }
    word.to_string()
}

pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
