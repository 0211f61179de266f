pub mod evaluate;
pub mod serde;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use ::serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{RecommendError, Result},
    utils::math::vector::SparseVec,
    vectorizer::{
        term::{CountMatrix, CountVectorizer, Vocabulary},
        tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine},
    },
};

/// Frozen TF-IDF model of a corpus.
///
/// Holds:
/// - the vocabulary (term -> column)
/// - the raw count matrix
/// - the smoothed IDF vector
/// - the weighted, L2-normalized document matrix
///
/// Built once by [`FittedModel::fit`] and never mutated afterwards, so any
/// number of queries may read it concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel<E = DefaultTFIDFEngine> {
    pub(crate) vocabulary: Vocabulary,
    pub(crate) counts: CountMatrix,
    pub(crate) idf: IDFVector,
    pub(crate) weighted: Vec<SparseVec<f64>>,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

impl<E> FittedModel<E>
where
    E: TFIDFEngine,
{
    /// Fit vocabulary -> counts -> IDF -> weighted matrix, in that order.
    ///
    /// Fails with [`RecommendError::EmptyCorpus`] when `lists` is empty.
    /// Lists that are themselves empty are fine and produce zero rows.
    pub fn fit<L, T>(lists: &[L]) -> Result<Self>
    where
        L: AsRef<[T]>,
        T: AsRef<str>,
    {
        if lists.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }
        let (vocabulary, counts) = CountVectorizer::fit(lists);
        let idf = E::idf_vec(&counts);
        let weighted = counts
            .rows()
            .iter()
            .map(|row| E::tfidf_vec(row, &idf))
            .collect();
        info!(
            "Fitted TF-IDF model over {} documents with {} terms",
            counts.doc_num(),
            vocabulary.len()
        );
        Ok(Self { vocabulary, counts, idf, weighted, _marker: PhantomData })
    }

    /// Embed a query's terms in the fitted space.
    /// Unknown terms contribute nothing; repeated terms count more than once.
    pub fn transform<T>(&self, terms: &[T]) -> SparseVec<f64>
    where
        T: AsRef<str>,
    {
        let counts = CountVectorizer::transform(terms, &self.vocabulary);
        E::tfidf_vec(&counts, &self.idf)
    }
}

impl<E> FittedModel<E> {
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn counts(&self) -> &CountMatrix {
        &self.counts
    }

    #[inline]
    pub fn idf(&self) -> &IDFVector {
        &self.idf
    }

    /// Weighted, normalized rows in corpus order.
    #[inline]
    pub fn weighted_rows(&self) -> &[SparseVec<f64>] {
        &self.weighted
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.weighted.len()
    }
}

impl<E> PartialEq for FittedModel<E> {
    fn eq(&self, other: &Self) -> bool {
        self.vocabulary == other.vocabulary
            && self.counts == other.counts
            && self.idf == other.idf
            && self.weighted == other.weighted
    }
}
