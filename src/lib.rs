//! bp-dupcheck - Duplicate detection for Business Partner records
//!
//! Compares normalized names pairwise and reports, for every record, its
//! most similar other records above a threshold.
//!
//! # Features
//! - Name normalization with a configurable ignore list (titles, legal suffixes)
//! - Weighted blend of token-sort, token-set and raw InDel similarity
//! - Immutable matching sessions with lazy, cancellable progress
//! - Parallel scans for larger datasets
//! - CSV/JSON export and optional Python bindings
//!
//! # Example
//! ```
//! use bp_dupcheck::{MatchOptions, Matcher, RawRow};
//!
//! let session = Matcher::default().load(vec![
//!     RawRow::new("A", "ABC Company Ltd.", ""),
//!     RawRow::new("B", "ABC Company Limited", ""),
//! ]);
//! let results = session.find_matches(&MatchOptions::default()).unwrap();
//! assert_eq!(results.get("A").unwrap()[0].candidate.id(), "B");
//! ```

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod input;
pub mod normalize;
pub mod record;
pub mod results;
pub mod scoring;
pub mod stats;

// Python bindings (enabled with the python feature)
#[cfg(feature = "python")]
mod python;

pub use config::MatcherConfig;
pub use engine::{MatchOptions, MatchScan, Matcher, Progress, Session};
pub use error::{ConfigError, ExportError, InputError, MatchError};
pub use normalize::{Normalizer, DEFAULT_IGNORE_WORDS};
pub use record::{RawRow, Record};
pub use results::{MatchCandidate, MatchResultSet, SourceMatches};
pub use scoring::{ScoreWeights, Scorer};
pub use stats::{summarize, ConfidenceTier, SummaryStatistics};
