//! Error types
//!
//! Normalization and scoring are total functions and have no error type.
//! Everything that can fail (run sequencing, configuration, the I/O
//! collaborators) reports through one of the enums below.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a matching run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Matching was requested on a session holding no records
    #[error("no records loaded: load at least one row with a usable id before matching")]
    NothingLoaded,

    /// `top_n` must allow at least one candidate per record
    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(usize),

    /// A NaN threshold would silently reject every pair
    #[error("min_score must be a number, got NaN")]
    InvalidMinScore,
}

/// Errors raised while building a matcher configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Weights must be finite, non-negative and sum to 1
    #[error("invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(usize),

    #[error("min_score must be a finite number, got {0}")]
    InvalidMinScore(f64),
}

/// Errors raised by the CSV input supplier.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks one or more required columns
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Errors raised by the output sinks.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}
