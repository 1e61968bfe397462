//! Summary statistics for assessing a matching run.
//!
//! Provides the confidence tiers used to triage candidates and the
//! aggregate counts reported alongside exported results.

use crate::results::MatchResultSet;
use crate::scoring::round2;
use serde::Serialize;
use std::fmt;

/// Scores at or above this are high confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Scores at or above this (and below high) are medium confidence.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 60.0;

/// Confidence bucket for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate view of a [`MatchResultSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Records analyzed (keys of the result set)
    pub total_records: usize,
    /// Records with at least one candidate
    pub records_with_matches: usize,
    /// Candidates across all records
    pub total_matches: usize,
    /// Mean candidate score rounded to 2 decimals, 0 when there are none
    pub average_score: f64,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
}

impl SummaryStatistics {
    /// Count for one tier.
    pub fn tier_count(&self, tier: ConfidenceTier) -> usize {
        match tier {
            ConfidenceTier::High => self.high_confidence,
            ConfidenceTier::Medium => self.medium_confidence,
            ConfidenceTier::Low => self.low_confidence,
        }
    }
}

/// Compute summary statistics over a result set.
///
/// Pure reducer: reads every candidate once and never fails.
pub fn summarize(results: &MatchResultSet) -> SummaryStatistics {
    let mut stats = SummaryStatistics {
        total_records: results.len(),
        ..SummaryStatistics::default()
    };

    let mut score_sum = 0.0;
    for (_, candidates) in results.iter() {
        if !candidates.is_empty() {
            stats.records_with_matches += 1;
        }
        for candidate in candidates {
            stats.total_matches += 1;
            score_sum += candidate.score;
            match candidate.confidence() {
                ConfidenceTier::High => stats.high_confidence += 1,
                ConfidenceTier::Medium => stats.medium_confidence += 1,
                ConfidenceTier::Low => stats.low_confidence += 1,
            }
        }
    }

    if stats.total_matches > 0 {
        stats.average_score = round2(score_sum / stats.total_matches as f64);
    }
    stats
}
