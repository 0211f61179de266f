use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::utils::math::vector::SparseVec;

/// Term -> column index mapping.
///
/// Columns are assigned in order of first appearance while scanning the
/// corpus keyword lists in document order. Frozen once built.
///
/// # Examples
/// ```
/// use cfp_recommender::vectorizer::term::Vocabulary;
/// let vocab = Vocabulary::fit(&[vec!["privacy", "data"], vec!["data", "ethic"]]);
///
/// assert_eq!(vocab.index_of("ethic"), Some(2));
/// assert_eq!(vocab.index_of("sonnet"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self { terms: IndexSet::new() }
    }

    /// Collect every distinct term of the given lists.
    pub fn fit<L, T>(lists: &[L]) -> Self
    where
        L: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut terms = IndexSet::new();
        for list in lists {
            for term in list.as_ref() {
                let term = term.as_ref();
                if !terms.contains(term) {
                    terms.insert(Box::from(term));
                }
            }
        }
        Self { terms }
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }

    /// Count the occurrences of `terms` against this vocabulary.
    /// Terms outside the vocabulary are dropped.
    pub fn count<T>(&self, terms: &[T]) -> SparseVec<u32>
    where
        T: AsRef<str>,
    {
        SparseVec::from_pairs(
            terms
                .iter()
                .filter_map(|t| self.index_of(t.as_ref()))
                .map(|idx| (idx as u32, 1u32)),
        )
    }
}

/// Document x term matrix of raw occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountMatrix {
    rows: Vec<SparseVec<u32>>,
    /// number of columns (vocabulary size at fit time)
    dim: usize,
}

impl CountMatrix {
    pub fn new(rows: Vec<SparseVec<u32>>, dim: usize) -> Self {
        Self { rows, dim }
    }

    #[inline]
    pub fn rows(&self) -> &[SparseVec<u32>] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, doc: usize) -> Option<&SparseVec<u32>> {
        self.rows.get(doc)
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows with a non-zero count, per column.
    pub fn document_frequencies(&self) -> Vec<u64> {
        let mut df = vec![0u64; self.dim];
        for row in &self.rows {
            for &ind in row.indices() {
                if let Some(slot) = df.get_mut(ind as usize) {
                    *slot += 1;
                }
            }
        }
        df
    }
}

/// Builds the vocabulary and count matrix from corpus keyword lists, and
/// counts later keyword lists against the frozen vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountVectorizer;

impl CountVectorizer {
    pub fn fit<L, T>(lists: &[L]) -> (Vocabulary, CountMatrix)
    where
        L: AsRef<[T]>,
        T: AsRef<str>,
    {
        let vocabulary = Vocabulary::fit(lists);
        let rows = lists
            .iter()
            .map(|list| vocabulary.count(list.as_ref()))
            .collect();
        let matrix = CountMatrix::new(rows, vocabulary.len());
        (vocabulary, matrix)
    }

    #[inline]
    pub fn transform<T>(terms: &[T], vocabulary: &Vocabulary) -> SparseVec<u32>
    where
        T: AsRef<str>,
    {
        vocabulary.count(terms)
    }
}
