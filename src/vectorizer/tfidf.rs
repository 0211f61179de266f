use serde::{Deserialize, Serialize};

use crate::{utils::math::vector::SparseVec, vectorizer::term::CountMatrix};

/// Per-term inverse document frequency, frozen at fit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IDFVector {
    /// one weight per vocabulary column
    pub idf_vec: Vec<f64>,
    /// number of documents the weights were fitted over
    pub doc_num: u64,
}

impl IDFVector {
    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn get(&self, column: usize) -> Option<f64> {
        self.idf_vec.get(column).copied()
    }
}

/// TF-IDF 計算エンジン
///
/// Plug a different weighting strategy into [`FittedModel`](super::FittedModel)
/// by implementing this trait.
pub trait TFIDFEngine {
    /// IDFベクトルを生成する
    /// # Arguments
    /// * `counts` - fit 対象の count matrix
    fn idf_vec(counts: &CountMatrix) -> IDFVector;

    /// count row を重み付けして正規化した row に変換する
    /// # Arguments
    /// * `counts` - 1 文書 (または query) の count row
    /// * `idf` - fit 済み IDF
    fn tfidf_vec(counts: &SparseVec<u32>, idf: &IDFVector) -> SparseVec<f64>;
}

/// Smoothed TF-IDF with L2-normalized rows.
///
/// - `idf(t) = ln((1 + N) / (1 + df(t))) + 1`, as if one extra document
///   contained every term; always > 0
/// - `w(t) = count(t) * idf(t)`, then each row scaled to unit length
///   (zero rows stay zero)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    #[inline]
    pub fn smoothed_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(counts: &CountMatrix) -> IDFVector {
        let doc_num = counts.doc_num() as u64;
        let idf_vec = counts
            .document_frequencies()
            .into_iter()
            .map(|df| Self::smoothed_idf(doc_num, df))
            .collect();
        IDFVector { idf_vec, doc_num }
    }

    fn tfidf_vec(counts: &SparseVec<u32>, idf: &IDFVector) -> SparseVec<f64> {
        // vocabulary 外の column は重み 0 として落とす
        let mut row = counts.map(|ind, count| {
            idf.get(ind as usize).map_or(0.0, |w| count as f64 * w)
        });
        row.l2_normalize();
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::term::CountVectorizer;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn smoothed_idf_values() {
        // term in every document still gets weight 1
        assert!(approx(DefaultTFIDFEngine::smoothed_idf(3, 3), 1.0));
        assert!(approx(DefaultTFIDFEngine::smoothed_idf(3, 2), (4.0f64 / 3.0).ln() + 1.0));
        assert!(approx(DefaultTFIDFEngine::smoothed_idf(3, 1), 2.0f64.ln() + 1.0));
        assert!(DefaultTFIDFEngine::smoothed_idf(3, 0) > 0.0);
    }

    #[test]
    fn idf_vec_follows_document_frequency() {
        let (_, counts) = CountVectorizer::fit(&[
            vec!["privacy", "data", "ethic"],
            vec!["poetry", "form", "sonnet"],
            vec!["privacy", "surveillance", "data"],
        ]);
        let idf = DefaultTFIDFEngine::idf_vec(&counts);
        assert_eq!(idf.doc_num, 3);
        assert_eq!(idf.len(), 7);
        assert!(approx(idf.idf_vec[0], (4.0f64 / 3.0).ln() + 1.0));
        assert!(approx(idf.idf_vec[2], 2.0f64.ln() + 1.0));
        assert!(idf.idf_vec.iter().all(|&w| w > 0.0));
    }

    #[test]
    fn rows_are_unit_length_or_zero() {
        let idf = IDFVector { idf_vec: vec![1.0, 2.0, 3.0], doc_num: 4 };
        let row = DefaultTFIDFEngine::tfidf_vec(&SparseVec::from_pairs([(0, 3u32), (2, 1)]), &idf);
        assert!(approx(row.norm(), 1.0));
        assert!(approx(row.get(0), 3.0 / 18.0f64.sqrt()));
        assert!(approx(row.get(2), 3.0 / 18.0f64.sqrt()));

        let zero = DefaultTFIDFEngine::tfidf_vec(&SparseVec::new(), &idf);
        assert!(zero.is_zero());
    }

    #[test]
    fn columns_past_the_idf_vector_are_dropped() {
        let idf = IDFVector { idf_vec: vec![1.0], doc_num: 1 };
        let row = DefaultTFIDFEngine::tfidf_vec(&SparseVec::from_pairs([(0, 1u32), (5, 2)]), &idf);
        assert_eq!(row.nnz(), 1);
        assert!(approx(row.get(0), 1.0));
    }
}
