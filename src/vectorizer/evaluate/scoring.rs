use rayon::prelude::*;

use crate::{
    config::RELEVANCY_SCALE,
    utils::math::vector::SparseVec,
    vectorizer::{tfidf::TFIDFEngine, FittedModel},
};

/// Cosine distance `1 - cos(θ)`, clamped to [0, 2].
///
/// A zero vector on either side has similarity 0, so its distance is 1.
#[inline]
pub fn cosine_distance(a: &SparseVec<f64>, b: &SparseVec<f64>) -> f64 {
    (1.0 - a.cosine_similarity(b)).clamp(0.0, 2.0)
}

/// Relevancy of a document at cosine distance `d`:
/// `(1/d - 1) * 10` for non-zero `d`, and 0 when `d` is exactly 0.
///
/// Distance 1 (no shared weighted terms) maps to 0. The zero-distance case
/// also maps to 0, so a query identical to a document scores 0 against it.
#[inline]
pub fn relevancy(distance: f64) -> f64 {
    if distance == 0.0 {
        0.0
    } else {
        (1.0 / distance - 1.0) * RELEVANCY_SCALE
    }
}

impl<E> FittedModel<E>
where
    E: TFIDFEngine,
{
    /// Cosine distance from `query` to every document, in corpus order.
    pub fn distances(&self, query: &SparseVec<f64>, parallel: bool) -> Vec<f64> {
        if parallel {
            self.weighted
                .par_iter()
                .map(|row| cosine_distance(query, row))
                .collect()
        } else {
            self.weighted
                .iter()
                .map(|row| cosine_distance(query, row))
                .collect()
        }
    }

    /// Relevancy of every document to the given query terms, in corpus order.
    pub fn relevance<T>(&self, terms: &[T], parallel: bool) -> Vec<f64>
    where
        T: AsRef<str>,
    {
        let query = self.transform(terms);
        self.distances(&query, parallel)
            .into_iter()
            .map(relevancy)
            .collect()
    }
}
