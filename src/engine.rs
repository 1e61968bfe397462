//! Duplicate matching engine
//!
//! [`Matcher::load`] turns raw rows into an immutable [`Session`] holding
//! the records and their cached normalized names. A session runs any
//! number of matching scans; sessions share nothing, so independent runs
//! can proceed concurrently.
//!
//! Matching is an exhaustive O(N^2) scan over ordered pairs. For each
//! source record every other record is scored, pairs below `min_score`
//! are dropped, and the rest are ranked and truncated to `top_n`.

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::normalize::Normalizer;
use crate::record::{RawRow, Record};
use crate::results::{MatchCandidate, MatchResultSet, SourceMatches};
use crate::scoring::Scorer;
use ahash::AHashMap;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Minimum session size for parallel matching.
///
/// Below this, the cost of one source row is too small to amortize
/// thread pool coordination.
const PARALLEL_THRESHOLD: usize = 100;

/// Default number of candidates kept per record.
pub const DEFAULT_TOP_N: usize = 3;

/// Default minimum score for a candidate.
pub const DEFAULT_MIN_SCORE: f64 = 50.0;

/// Parameters of one matching run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Maximum candidates kept per source record (at least 1)
    pub top_n: usize,
    /// Inclusive score threshold; not clamped to 0-100
    pub min_score: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl MatchOptions {
    pub fn new(top_n: usize, min_score: f64) -> Self {
        Self { top_n, min_score }
    }

    fn validate(&self) -> Result<(), MatchError> {
        if self.top_n == 0 {
            return Err(MatchError::InvalidTopN(self.top_n));
        }
        if self.min_score.is_nan() {
            return Err(MatchError::InvalidMinScore);
        }
        Ok(())
    }
}

/// Progress of a scan, reported after each completed source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in percent.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        }
    }
}

/// Builds matching sessions from raw rows.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    normalizer: Normalizer,
    scorer: Scorer,
}

impl Matcher {
    pub fn new(normalizer: Normalizer, scorer: Scorer) -> Self {
        Self { normalizer, scorer }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.normalizer(), Scorer::new(config.weights))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Load rows into a new session.
    ///
    /// Rows with a missing or blank id are skipped, as are rows repeating
    /// an id already loaded. Missing names read as empty. Never fails;
    /// check [`Session::len`] for the loaded count.
    pub fn load<I, R>(&self, rows: I) -> Session
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRow>,
    {
        let mut records: Vec<Arc<Record>> = Vec::new();
        let mut normalized: Vec<String> = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut skipped = 0usize;

        for (row_num, row) in rows.into_iter().enumerate() {
            let row: RawRow = row.into();
            let Some(record) = row.to_record() else {
                debug!(row = row_num, "skipping row without an id");
                skipped += 1;
                continue;
            };
            if index.contains_key(record.id()) {
                debug!(row = row_num, id = record.id(), "skipping duplicate id");
                skipped += 1;
                continue;
            }

            index.insert(record.id().to_string(), records.len());
            normalized.push(self.normalizer.normalize(record.combined_name()));
            records.push(Arc::new(record));
        }

        info!(loaded = records.len(), skipped, "loaded records");

        Session {
            records,
            normalized,
            index,
            scorer: self.scorer,
        }
    }
}

/// Records and normalized names for one matching run.
///
/// Immutable once built, so it is `Send + Sync` and can be scanned from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<Arc<Record>>,
    // Parallel to `records`
    normalized: Vec<String>,
    index: AHashMap<String, usize>,
    scorer: Scorer,
}

impl Session {
    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in load order.
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&i| self.records[i].as_ref())
    }

    /// Cached normalized name for a record id.
    pub fn normalized(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&i| self.normalized[i].as_str())
    }

    /// Start a lazy scan yielding one [`Progress`] per source record.
    ///
    /// Dropping the scan abandons the run; [`MatchScan::finish`] completes
    /// it and returns the results.
    pub fn scan(&self, options: &MatchOptions) -> Result<MatchScan<'_>, MatchError> {
        self.check_ready(options)?;
        debug!(
            records = self.len(),
            top_n = options.top_n,
            min_score = options.min_score,
            "starting match scan"
        );
        Ok(MatchScan {
            session: self,
            options: *options,
            entries: Vec::with_capacity(self.len()),
        })
    }

    /// Run a full scan and return the ranked candidates for every record.
    ///
    /// # Errors
    /// [`MatchError::NothingLoaded`] for an empty session, or an invalid
    /// option error.
    pub fn find_matches(&self, options: &MatchOptions) -> Result<MatchResultSet, MatchError> {
        Ok(self.scan(options)?.finish())
    }

    /// Run a full scan, calling `on_progress` after each source record.
    ///
    /// The callback runs synchronously inside the scan and should return
    /// promptly.
    pub fn find_matches_with_progress<F>(
        &self,
        options: &MatchOptions,
        mut on_progress: F,
    ) -> Result<MatchResultSet, MatchError>
    where
        F: FnMut(Progress),
    {
        let mut scan = self.scan(options)?;
        for progress in scan.by_ref() {
            on_progress(progress);
        }
        Ok(scan.finish())
    }

    /// Same results as [`Session::find_matches`], spreading source records
    /// across the rayon pool for larger sessions.
    pub fn find_matches_parallel(
        &self,
        options: &MatchOptions,
    ) -> Result<MatchResultSet, MatchError> {
        if self.len() < PARALLEL_THRESHOLD {
            return self.find_matches(options);
        }
        self.check_ready(options)?;

        // Indexed collect keeps load order
        let entries: Vec<SourceMatches> = (0..self.len())
            .into_par_iter()
            .map(|i| self.rank_candidates(i, options))
            .collect();

        info!(records = entries.len(), "match scan complete (parallel)");
        Ok(MatchResultSet::from_entries(entries))
    }

    fn check_ready(&self, options: &MatchOptions) -> Result<(), MatchError> {
        if self.is_empty() {
            return Err(MatchError::NothingLoaded);
        }
        options.validate()
    }

    /// Score one source against every other record, keeping the best.
    fn rank_candidates(&self, source_idx: usize, options: &MatchOptions) -> SourceMatches {
        let source = &self.records[source_idx];
        let source_name = &self.normalized[source_idx];

        let mut candidates: Vec<MatchCandidate> = self
            .records
            .iter()
            .zip(&self.normalized)
            .enumerate()
            .filter(|&(target_idx, _)| target_idx != source_idx)
            .filter_map(|(_, (target, target_name))| {
                let score = self.scorer.score(source_name, target_name);
                (score >= options.min_score).then(|| MatchCandidate {
                    source: Arc::clone(source),
                    candidate: Arc::clone(target),
                    score,
                })
            })
            .collect();

        // Stable: equal scores keep load order
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(options.top_n);

        SourceMatches {
            source: Arc::clone(source),
            candidates,
        }
    }
}

/// An in-progress matching run over a [`Session`].
///
/// Each call to `next` ranks one more source record and reports progress.
/// Iteration cannot be rewound; rerun [`Session::scan`] to start over.
#[derive(Debug)]
pub struct MatchScan<'a> {
    session: &'a Session,
    options: MatchOptions,
    entries: Vec<SourceMatches>,
}

impl MatchScan<'_> {
    pub fn total(&self) -> usize {
        self.session.len()
    }

    pub fn completed(&self) -> usize {
        self.entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == self.total()
    }

    /// Rank any remaining source records and return the result set.
    pub fn finish(mut self) -> MatchResultSet {
        for _ in self.by_ref() {}
        info!(records = self.entries.len(), "match scan complete");
        MatchResultSet::from_entries(self.entries)
    }
}

impl Iterator for MatchScan<'_> {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        let source_idx = self.entries.len();
        if source_idx >= self.session.len() {
            return None;
        }

        let ranked = self.session.rank_candidates(source_idx, &self.options);
        trace!(
            source = ranked.source.id(),
            candidates = ranked.candidates.len(),
            "ranked source"
        );
        self.entries.push(ranked);

        Some(Progress {
            completed: self.entries.len(),
            total: self.session.len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.completed();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MatchScan<'_> {}
