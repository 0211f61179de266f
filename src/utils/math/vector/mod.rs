pub mod math;

use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

/// SparseVec は 0 要素を省いた疎ベクトル
/// indices と values を別々に持ち (SoA)、
/// indices は昇順・重複なしであることを保証します
///
/// Used for count rows (`SparseVec<u32>`) and weighted rows (`SparseVec<f64>`).
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SparseVec<N> {
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        SparseVec { inds: Vec::new(), vals: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        SparseVec { inds: Vec::with_capacity(cap), vals: Vec::with_capacity(cap) }
    }

    /// Append an entry past the current last index.
    /// Zero values are skipped.
    ///
    /// # Panics
    /// In debug builds, if `index` is not greater than the last stored index.
    #[inline]
    pub fn push(&mut self, index: u32, value: N) {
        debug_assert!(
            self.inds.last().map_or(true, |&last| last < index),
            "SparseVec indices must be pushed in ascending order"
        );
        if value.is_zero() {
            return;
        }
        self.inds.push(index);
        self.vals.push(value);
    }

    /// Build from (index, value) pairs in any order.
    /// Values sharing an index are summed.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
    {
        let mut pairs: Vec<(u32, N)> = pairs.into_iter().collect();
        // stable: 同じ index の加算順を入力順に保つ
        pairs.sort_by_key(|&(ind, _)| ind);

        let mut vec = SparseVec::with_capacity(pairs.len());
        let mut iter = pairs.into_iter();
        let Some((mut cur_ind, mut cur_val)) = iter.next() else {
            return vec;
        };
        for (ind, val) in iter {
            if ind == cur_ind {
                cur_val = cur_val + val;
            } else {
                vec.push(cur_ind, cur_val);
                cur_ind = ind;
                cur_val = val;
            }
        }
        vec.push(cur_ind, cur_val);
        vec
    }

    /// Number of stored (non-zero) entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn get(&self, index: u32) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Largest stored index, if any.
    #[inline]
    pub fn max_index(&self) -> Option<u32> {
        self.inds.last().copied()
    }

    /// One value per index, indices strictly ascending and below `dim`.
    /// Always true for vectors built through this API; decoded ones are
    /// checked with it.
    pub fn is_well_formed(&self, dim: usize) -> bool {
        self.inds.len() == self.vals.len()
            && self.inds.windows(2).all(|w| w[0] < w[1])
            && self.inds.last().map_or(true, |&last| (last as usize) < dim)
    }

    /// Dense copy of length `dim`; entries at or beyond `dim` are dropped.
    pub fn to_dense(&self, dim: usize) -> Vec<N> {
        let mut dense = vec![N::zero(); dim];
        for (ind, val) in self.iter() {
            if let Some(slot) = dense.get_mut(ind as usize) {
                *slot = val;
            }
        }
        dense
    }

    /// Map every stored value, dropping those that become zero.
    pub fn map<M, F>(&self, mut f: F) -> SparseVec<M>
    where
        M: Num + Copy,
        F: FnMut(u32, N) -> M,
    {
        let mut out = SparseVec::with_capacity(self.nnz());
        for (ind, val) in self.iter() {
            out.push(ind, f(ind, val));
        }
        out
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.inds.iter().zip(self.vals.iter()))
            .finish()
    }
}
