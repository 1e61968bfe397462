//! Weighted similarity scoring for normalized names
//!
//! A duplicate score blends three metrics from [`crate::algorithms`]:
//!
//! - token sort ratio: tolerant of word order ("smith jane" / "jane smith")
//! - token set ratio: tolerant of extra words on one side
//! - raw ratio: rewards near-identical strings
//!
//! Computes: round₂(w_sort × token_sort + w_set × token_set + w_raw × raw)

use crate::algorithms::{Indel, Similarity, TokenSet, TokenSort};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default weight of the token sort ratio.
pub const DEFAULT_TOKEN_SORT_WEIGHT: f64 = 0.4;

/// Default weight of the token set ratio.
pub const DEFAULT_TOKEN_SET_WEIGHT: f64 = 0.4;

/// Default weight of the raw ratio.
pub const DEFAULT_RAW_WEIGHT: f64 = 0.2;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Blend weights for the three metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub token_sort: f64,
    pub token_set: f64,
    pub raw: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            token_sort: DEFAULT_TOKEN_SORT_WEIGHT,
            token_set: DEFAULT_TOKEN_SET_WEIGHT,
            raw: DEFAULT_RAW_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Validated weights: each finite and non-negative, summing to 1.
    pub fn new(token_sort: f64, token_set: f64, raw: f64) -> Result<Self, ConfigError> {
        let weights = Self {
            token_sort,
            token_set,
            raw,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in [
            ("token_sort", self.token_sort),
            ("token_set", self.token_set),
            ("raw", self.raw),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{} must be a finite, non-negative number, got {}",
                    name, w
                )));
            }
        }
        let sum = self.token_sort + self.token_set + self.raw;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(())
    }
}

/// Individual metric values behind one score, useful for explaining a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub token_sort: f64,
    pub token_set: f64,
    pub raw: f64,
    pub score: f64,
}

/// Scores pairs of normalized names on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Similarity of two normalized names, rounded to 2 decimals.
    ///
    /// An empty name never matches: either side empty scores 0.
    ///
    /// # Examples
    /// ```
    /// use bp_dupcheck::scoring::Scorer;
    /// let scorer = Scorer::default();
    /// assert_eq!(scorer.score("jane smith", "smith jane"), 100.0);
    /// assert_eq!(scorer.score("", "jane smith"), 0.0);
    /// ```
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.breakdown(a, b).score
    }

    /// Like [`Scorer::score`] but keeps the individual metric values.
    #[must_use]
    pub fn breakdown(&self, a: &str, b: &str) -> ScoreBreakdown {
        if a.is_empty() || b.is_empty() {
            return ScoreBreakdown {
                token_sort: 0.0,
                token_set: 0.0,
                raw: 0.0,
                score: 0.0,
            };
        }

        let token_sort = TokenSort.similarity(a, b);
        let token_set = TokenSet.similarity(a, b);
        let raw = Indel.similarity(a, b);

        let weighted = token_sort * self.weights.token_sort
            + token_set * self.weights.token_set
            + raw * self.weights.raw;

        ScoreBreakdown {
            token_sort,
            token_set,
            raw,
            score: round2(weighted.clamp(0.0, 100.0)),
        }
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
