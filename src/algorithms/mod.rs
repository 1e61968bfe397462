//! String similarity primitives used by the scorer.
//!
//! Each metric is a standalone function for composability, plus a
//! trait-based interface so the scorer can treat them uniformly.

pub mod fuzz;
pub mod indel;

pub use fuzz::{ratio, token_set_ratio, token_sort_ratio};
pub use indel::{indel_distance, indel_similarity, lcs_length, Indel};

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 100.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (100.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        100.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Word-order-insensitive comparison, see [`fuzz::token_sort_ratio`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSort;

impl Similarity for TokenSort {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        token_sort_ratio(a, b)
    }

    fn name(&self) -> &'static str {
        "token_sort"
    }
}

/// Token subset/superset comparison, see [`fuzz::token_set_ratio`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSet;

impl Similarity for TokenSet {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        token_set_ratio(a, b)
    }

    fn name(&self) -> &'static str {
        "token_set"
    }
}
