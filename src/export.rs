//! Output sinks for match results
//!
//! Flattens a [`MatchResultSet`] into one row per candidate and writes it
//! as CSV or JSON. Row order follows the result set's iteration order.

use crate::error::ExportError;
use crate::results::MatchResultSet;
use crate::stats::SummaryStatistics;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One exported candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Source BP Number")]
    pub source_id: String,
    #[serde(rename = "Source Name1")]
    pub source_name1: String,
    #[serde(rename = "Source Name2")]
    pub source_name2: String,
    /// 1-based position within the source's candidates
    #[serde(rename = "Match Rank")]
    pub rank: usize,
    #[serde(rename = "Match BP Number")]
    pub match_id: String,
    #[serde(rename = "Match Name1")]
    pub match_name1: String,
    #[serde(rename = "Match Name2")]
    pub match_name2: String,
    #[serde(rename = "Similarity Score")]
    pub score: f64,
    #[serde(rename = "Confidence Level")]
    pub confidence: String,
}

/// Flatten results; sources without candidates produce no rows.
pub fn export_rows(results: &MatchResultSet) -> Vec<ExportRow> {
    results
        .entries()
        .iter()
        .flat_map(|entry| {
            entry
                .candidates
                .iter()
                .enumerate()
                .map(|(i, m)| ExportRow {
                    source_id: m.source.id().to_string(),
                    source_name1: m.source.name1().to_string(),
                    source_name2: m.source.name2().to_string(),
                    rank: i + 1,
                    match_id: m.candidate.id().to_string(),
                    match_name1: m.candidate.name1().to_string(),
                    match_name2: m.candidate.name2().to_string(),
                    score: m.score,
                    confidence: m.confidence().label().to_string(),
                })
        })
        .collect()
}

/// Write the matching results table as CSV.
pub fn write_results_csv<W: Write>(results: &MatchResultSet, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = export_rows(results);
    if rows.is_empty() {
        // serde only emits headers alongside the first row
        csv_writer.write_record([
            "Source BP Number",
            "Source Name1",
            "Source Name2",
            "Match Rank",
            "Match BP Number",
            "Match Name1",
            "Match Name2",
            "Similarity Score",
            "Confidence Level",
        ])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Label/value rows of the summary report.
pub fn summary_rows(stats: &SummaryStatistics) -> Vec<(&'static str, String)> {
    vec![
        ("Total Records Analyzed", stats.total_records.to_string()),
        (
            "Records with Potential Matches",
            stats.records_with_matches.to_string(),
        ),
        ("Total Match Pairs Found", stats.total_matches.to_string()),
        (
            "Average Similarity Score",
            format!("{:.2}%", stats.average_score),
        ),
        ("High Confidence (>=80%)", stats.high_confidence.to_string()),
        (
            "Medium Confidence (60-79%)",
            stats.medium_confidence.to_string(),
        ),
        ("Low Confidence (<60%)", stats.low_confidence.to_string()),
    ]
}

/// Write the summary report as two-column CSV.
pub fn write_summary_csv<W: Write>(
    stats: &SummaryStatistics,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Metric", "Value"])?;
    for (label, value) in summary_rows(stats) {
        csv_writer.write_record([label, value.as_str()])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    matches: Vec<ExportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SummaryStatistics>,
}

/// Write results and optional summary as a pretty-printed JSON document.
pub fn write_json<W: Write>(
    results: &MatchResultSet,
    summary: Option<&SummaryStatistics>,
    writer: W,
) -> Result<(), ExportError> {
    let report = JsonReport {
        matches: export_rows(results),
        summary,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Create `path` and hand a buffered writer to `write`.
pub fn write_to_path<F>(path: impl AsRef<Path>, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ExportError>,
{
    let path = path.as_ref();
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(io_err)
}
