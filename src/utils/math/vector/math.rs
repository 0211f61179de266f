use std::cmp::Ordering;

use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// ドット積
    /// d(a, b) = Σ(a_i * b_i)
    /// indices を突き合わせる merge join
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());
        let mut result = N::zero();
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result = result + a_vals[i] * b_vals[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Σ(a_i^2)
    /// Accumulates in the same order as `dot`, so `v.dot(&v) == v.norm_sq()` bit for bit.
    #[inline]
    pub fn norm_sq(&self) -> N {
        self.values().iter().fold(N::zero(), |acc, &v| acc + v * v)
    }

    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Rescale to unit L2 norm. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            return;
        }
        for v in self.vals_mut() {
            *v = *v / norm;
        }
    }

    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / sqrt(||a||^2 * ||b||^2)
    /// Zero on either side gives 0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> N {
        let norm_a = self.norm_sq();
        let norm_b = other.norm_sq();
        if norm_a.is_zero() || norm_b.is_zero() {
            return N::zero();
        }
        self.dot(other) / (norm_a * norm_b).sqrt()
    }

    /// No NaN or infinite value is stored.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.vals.iter().all(|v| v.is_finite())
    }

    #[inline]
    fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }
}
