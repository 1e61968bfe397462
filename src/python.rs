//! Python bindings
//!
//! Exposes normalization, scoring and full matching runs to Python as the
//! `_core` extension module. Rows are passed as dicts keyed by
//! `BP_Number`, `Name1` and `Name2`.

use crate::engine::{MatchOptions, Matcher};
use crate::error::MatchError;
use crate::normalize::Normalizer;
use crate::record::RawRow;
use crate::results::MatchResultSet;
use crate::scoring::Scorer;
use crate::stats::SummaryStatistics;
use pyo3::create_exception;
use pyo3::prelude::*;
use std::collections::HashMap;

create_exception!(bp_dupcheck, DupCheckError, pyo3::exceptions::PyException);
create_exception!(bp_dupcheck, ValidationError, DupCheckError);

impl From<MatchError> for PyErr {
    fn from(err: MatchError) -> PyErr {
        ValidationError::new_err(err.to_string())
    }
}

/// One candidate pair, flattened for Python.
#[pyclass]
#[derive(Clone, Debug)]
pub struct MatchRow {
    #[pyo3(get)]
    pub source_id: String,
    #[pyo3(get)]
    pub match_id: String,
    /// 1-based rank within the source's candidates
    #[pyo3(get)]
    pub rank: usize,
    /// Similarity score (0.0-100.0)
    #[pyo3(get)]
    pub score: f64,
    #[pyo3(get)]
    pub confidence: String,
}

#[pymethods]
impl MatchRow {
    fn __repr__(&self) -> String {
        format!(
            "MatchRow(source_id='{}', match_id='{}', rank={}, score={:.2}, confidence='{}')",
            self.source_id, self.match_id, self.rank, self.score, self.confidence
        )
    }
}

/// Summary statistics of a matching run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SummaryStats {
    #[pyo3(get)]
    pub total_records: usize,
    #[pyo3(get)]
    pub records_with_matches: usize,
    #[pyo3(get)]
    pub total_matches: usize,
    #[pyo3(get)]
    pub average_score: f64,
    #[pyo3(get)]
    pub high_confidence: usize,
    #[pyo3(get)]
    pub medium_confidence: usize,
    #[pyo3(get)]
    pub low_confidence: usize,
}

#[pymethods]
impl SummaryStats {
    fn __repr__(&self) -> String {
        format!(
            "SummaryStats(total_records={}, records_with_matches={}, total_matches={}, average_score={:.2})",
            self.total_records, self.records_with_matches, self.total_matches, self.average_score
        )
    }
}

impl From<SummaryStatistics> for SummaryStats {
    fn from(s: SummaryStatistics) -> Self {
        Self {
            total_records: s.total_records,
            records_with_matches: s.records_with_matches,
            total_matches: s.total_matches,
            average_score: s.average_score,
            high_confidence: s.high_confidence,
            medium_confidence: s.medium_confidence,
            low_confidence: s.low_confidence,
        }
    }
}

fn row_from_dict(row: &HashMap<String, String>) -> RawRow {
    RawRow {
        id: row.get("BP_Number").cloned(),
        name1: row.get("Name1").cloned(),
        name2: row.get("Name2").cloned(),
    }
}

fn run_matching(
    py: Python<'_>,
    rows: Vec<HashMap<String, String>>,
    ignore_words: Option<Vec<String>>,
    top_n: usize,
    min_score: f64,
) -> PyResult<MatchResultSet> {
    let normalizer = Normalizer::from_optional(ignore_words.as_deref());
    let matcher = Matcher::new(normalizer, Scorer::default());
    let options = MatchOptions::new(top_n, min_score);
    let results = py.allow_threads(|| {
        let session = matcher.load(rows.iter().map(row_from_dict));
        session.find_matches_parallel(&options)
    })?;
    Ok(results)
}

/// Normalize a name for comparison.
///
/// `ignore_words=None` uses the built-in list of titles and legal suffixes.
#[pyfunction]
#[pyo3(signature = (text, ignore_words=None))]
fn normalize(text: &str, ignore_words: Option<Vec<String>>) -> String {
    Normalizer::from_optional(ignore_words.as_deref()).normalize(text)
}

/// Weighted similarity (0-100) of two already-normalized names.
#[pyfunction]
fn similarity(a: &str, b: &str) -> f64 {
    Scorer::default().score(a, b)
}

/// Find likely duplicates among rows.
///
/// # Example
/// ```python
/// >>> find_matches([{"BP_Number": "A", "Name1": "ABC Ltd", "Name2": ""},
/// ...               {"BP_Number": "B", "Name1": "ABC Limited", "Name2": ""}])
/// [MatchRow(source_id='A', match_id='B', rank=1, score=100.00, confidence='High'), ...]
/// ```
#[pyfunction]
#[pyo3(signature = (rows, ignore_words=None, top_n=3, min_score=50.0))]
fn find_matches(
    py: Python<'_>,
    rows: Vec<HashMap<String, String>>,
    ignore_words: Option<Vec<String>>,
    top_n: usize,
    min_score: f64,
) -> PyResult<Vec<MatchRow>> {
    let results = run_matching(py, rows, ignore_words, top_n, min_score)?;
    let rows = results
        .entries()
        .iter()
        .flat_map(|entry| {
            entry.candidates.iter().enumerate().map(|(i, m)| MatchRow {
                source_id: m.source.id().to_string(),
                match_id: m.candidate.id().to_string(),
                rank: i + 1,
                score: m.score,
                confidence: m.confidence().label().to_string(),
            })
        })
        .collect();
    Ok(rows)
}

/// Run matching and return only the summary statistics.
#[pyfunction]
#[pyo3(signature = (rows, ignore_words=None, top_n=3, min_score=50.0))]
fn summary_stats(
    py: Python<'_>,
    rows: Vec<HashMap<String, String>>,
    ignore_words: Option<Vec<String>>,
    top_n: usize,
    min_score: f64,
) -> PyResult<SummaryStats> {
    let results = run_matching(py, rows, ignore_words, top_n, min_score)?;
    Ok(results.summary().into())
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("DupCheckError", py.get_type::<DupCheckError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;

    m.add_class::<MatchRow>()?;
    m.add_class::<SummaryStats>()?;

    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(similarity, m)?)?;
    m.add_function(wrap_pyfunction!(find_matches, m)?)?;
    m.add_function(wrap_pyfunction!(summary_stats, m)?)?;
    Ok(())
}
