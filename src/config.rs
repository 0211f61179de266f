//! Tuning parameters for the recommender.
//!
//! Compile-time defaults are the constants below; callers override them
//! through [`RecommenderConfig`], which the CLI can also read from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Relevancy a document must strictly exceed to be recommended.
pub const DEFAULT_MIN_RELEVANCY: f64 = 0.3;

/// Number of whitespace-delimited words quoted from an abstract query.
pub const ABSTRACT_PREVIEW_WORDS: usize = 6;

/// Scale applied to `1/d - 1` when turning a cosine distance into relevancy.
pub const RELEVANCY_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Threshold used when a query method is given `None`.
    pub min_relevancy: f64,
    pub abstract_preview_words: usize,
    /// Appended to the built-in stopword set.
    pub extra_stopwords: Vec<String>,
    /// Use rayon for fit-time normalization and per-query scoring.
    pub parallel: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_relevancy: DEFAULT_MIN_RELEVANCY,
            abstract_preview_words: ABSTRACT_PREVIEW_WORDS,
            extra_stopwords: Vec::new(),
            parallel: true,
        }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_relevancy.is_nan() {
            return Err(RecommendError::InvalidThreshold(self.min_relevancy));
        }
        if self.abstract_preview_words == 0 {
            return Err(RecommendError::InvalidConfig(
                "abstract_preview_words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve an optional per-call threshold against the configured default.
    #[inline]
    pub fn threshold(&self, threshold: Option<f64>) -> f64 {
        threshold.unwrap_or(self.min_relevancy)
    }
}
