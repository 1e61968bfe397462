//! Matcher configuration
//!
//! Loaded from TOML. Every field is optional:
//!
//! ```toml
//! ignore_words = ["mr", "mrs", "ltd", "inc"]   # omit for the built-in list
//! min_score = 60.0
//! top_n = 5
//!
//! [weights]
//! token_sort = 0.4
//! token_set = 0.4
//! raw = 0.2
//! ```

use crate::engine::{MatchOptions, DEFAULT_MIN_SCORE, DEFAULT_TOP_N};
use crate::error::ConfigError;
use crate::normalize::Normalizer;
use crate::scoring::ScoreWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// `None` selects the built-in ignore list; an empty list ignores nothing
    pub ignore_words: Option<Vec<String>>,
    pub min_score: f64,
    pub top_n: usize,
    pub weights: ScoreWeights,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            ignore_words: None,
            min_score: DEFAULT_MIN_SCORE,
            top_n: DEFAULT_TOP_N,
            weights: ScoreWeights::default(),
        }
    }
}

impl MatcherConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN(self.top_n));
        }
        if !self.min_score.is_finite() {
            return Err(ConfigError::InvalidMinScore(self.min_score));
        }
        self.weights.validate()
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::from_optional(self.ignore_words.as_deref())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions::new(self.top_n, self.min_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MatcherConfig::from_toml_str("").unwrap();
        assert_eq!(config, MatcherConfig::default());
        assert_eq!(config.normalizer(), Normalizer::default());
        assert_eq!(config.match_options(), MatchOptions::default());
    }

    #[test]
    fn test_full_document() {
        let config = MatcherConfig::from_toml_str(
            r#"
            ignore_words = ["Ltd", "Inc"]
            min_score = 70
            top_n = 5

            [weights]
            token_sort = 0.5
            token_set = 0.3
            raw = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.min_score, 70.0);
        assert_eq!(config.weights.token_sort, 0.5);
        let normalizer = config.normalizer();
        assert_eq!(normalizer.ignore_words().len(), 2);
        assert_eq!(normalizer.normalize("Acme Ltd"), "acme");
    }

    #[test]
    fn test_empty_ignore_list() {
        let config = MatcherConfig::from_toml_str("ignore_words = []").unwrap();
        assert!(config.normalizer().ignore_words().is_empty());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            MatcherConfig::from_toml_str("top_n = 0"),
            Err(ConfigError::InvalidTopN(0))
        ));
        assert!(matches!(
            MatcherConfig::from_toml_str("[weights]\nraw = 0.9"),
            Err(ConfigError::InvalidWeights(_))
        ));
        assert!(matches!(
            MatcherConfig::from_toml_str("unknown_key = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = MatcherConfig::from_path("/nonexistent/bp-dupcheck.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
