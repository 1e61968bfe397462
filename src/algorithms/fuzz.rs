//! Token-aware ratios for fuzzy name matching.
//!
//! This module provides the three comparisons the duplicate scorer blends:
//! - `ratio`: plain InDel similarity of the full strings
//! - `token_sort_ratio`: order-insensitive comparison
//! - `token_set_ratio`: subset-tolerant comparison
//!
//! All functions return a value on a 0-100 scale.

use super::indel::indel_similarity;
use ahash::AHashSet;

/// Compute basic similarity ratio (alias for indel_similarity).
///
/// # Examples
/// ```
/// use bp_dupcheck::algorithms::fuzz::ratio;
/// assert_eq!(ratio("acme", "acme"), 100.0);
/// ```
#[must_use]
pub fn ratio(s1: &str, s2: &str) -> f64 {
    indel_similarity(s1, s2)
}

/// Tokenize a string into words, sort them, and rejoin.
fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compute similarity after tokenizing and sorting both strings.
///
/// Useful for comparing names where word order doesn't matter.
/// "smith jane" matches "jane smith" perfectly.
///
/// # Examples
/// ```
/// use bp_dupcheck::algorithms::fuzz::token_sort_ratio;
/// assert_eq!(token_sort_ratio("smith jane", "jane smith"), 100.0);
/// ```
#[must_use]
pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    let sorted1 = sorted_tokens(s1);
    let sorted2 = sorted_tokens(s2);
    ratio(&sorted1, &sorted2)
}

/// Join a token group with single spaces after sorting it.
fn join_sorted(mut tokens: Vec<&str>) -> String {
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compute set-based token similarity.
///
/// Splits both strings into token sets and compares the shared tokens
/// (`sect`) against `sect` extended with each side's leftover tokens.
/// When one token set contains the other the result is 100, so
/// "global trading" matches "global trading international" perfectly.
///
/// Returns 0 when either string has no tokens.
///
/// # Examples
/// ```
/// use bp_dupcheck::algorithms::fuzz::token_set_ratio;
/// assert_eq!(token_set_ratio("global trading", "trading global international"), 100.0);
/// ```
#[must_use]
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let set1: AHashSet<&str> = s1.split_whitespace().collect();
    let set2: AHashSet<&str> = s2.split_whitespace().collect();

    if set1.is_empty() || set2.is_empty() {
        return 0.0;
    }

    let sect = join_sorted(set1.intersection(&set2).copied().collect());
    let diff_ab = join_sorted(set1.difference(&set2).copied().collect());
    let diff_ba = join_sorted(set2.difference(&set1).copied().collect());

    // One side is a subset of the other
    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let extend = |diff: &str| {
        if sect.is_empty() {
            diff.to_string()
        } else {
            format!("{} {}", sect, diff)
        }
    };
    let combined1 = extend(&diff_ab);
    let combined2 = extend(&diff_ba);

    let mut best = ratio(&combined1, &combined2);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined1))
            .max(ratio(&sect, &combined2));
    }
    best
}
