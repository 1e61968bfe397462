//! Match results
//!
//! A [`MatchResultSet`] maps every loaded record to its ranked candidates.
//! Iteration order is deterministic: sources in load order, candidates by
//! descending score with ties in load order, so exports are reproducible.

use crate::record::Record;
use crate::stats::{summarize, ConfidenceTier, SummaryStatistics};
use ahash::AHashMap;
use serde::Serialize;
use std::sync::Arc;

/// A candidate duplicate of a source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub source: Arc<Record>,
    pub candidate: Arc<Record>,
    /// Similarity score (0.0-100.0)
    pub score: f64,
}

impl MatchCandidate {
    pub fn confidence(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.score)
    }
}

/// The ranked candidates of one source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMatches {
    pub source: Arc<Record>,
    pub candidates: Vec<MatchCandidate>,
}

/// Ranked candidates for every record of a matching run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResultSet {
    entries: Vec<SourceMatches>,
    index: AHashMap<String, usize>,
}

impl MatchResultSet {
    /// Entries must be in load order with unique source ids.
    pub(crate) fn from_entries(entries: Vec<SourceMatches>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.source.id().to_string(), i))
            .collect();
        Self { entries, index }
    }

    /// Number of source records (keys).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates for a source id, or `None` if the id was never loaded.
    pub fn get(&self, id: &str) -> Option<&[MatchCandidate]> {
        self.index
            .get(id)
            .map(|&i| self.entries[i].candidates.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// `(source id, candidates)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchCandidate])> {
        self.entries
            .iter()
            .map(|e| (e.source.id(), e.candidates.as_slice()))
    }

    pub fn entries(&self) -> &[SourceMatches] {
        &self.entries
    }

    /// Every candidate across all sources, in iteration order.
    pub fn candidates(&self) -> impl Iterator<Item = &MatchCandidate> {
        self.entries.iter().flat_map(|e| e.candidates.iter())
    }

    pub fn summary(&self) -> SummaryStatistics {
        summarize(self)
    }
}

impl<'a> IntoIterator for &'a MatchResultSet {
    type Item = &'a SourceMatches;
    type IntoIter = std::slice::Iter<'a, SourceMatches>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
