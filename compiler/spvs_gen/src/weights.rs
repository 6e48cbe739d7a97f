//! Per-session weight tables.
//!
//! One table per [`Category`], aligned with [`Category::members`]. Weights
//! are non-negative; a variant with weight 0 is never sampled. Zeros set
//! through [`WeightTable::set_zero_probability`] are pinned: they survive
//! re-parametrization for the rest of the session.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use spvs_ir::{Category, OpKind};

/// Uniform weights.
pub fn uniform(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

/// Discretized Gaussian: `w_i = exp(-(i - mean)^2 / (2 std_dev^2))`.
///
/// The variant closest to `mean` always has a weight near 1, so the table
/// is never all zero.
#[expect(
    clippy::cast_precision_loss,
    reason = "variant indices are tiny compared to f64 precision"
)]
pub fn gaussian(n: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    let denom = 2.0 * std_dev * std_dev;
    (0..n)
        .map(|i| {
            let d = i as f64 - mean;
            (-(d * d) / denom).exp()
        })
        .collect()
}

/// Beta-Binomial pmf over `n` ordered variants (support `0..n`).
///
/// Computed in log space from the ratio
/// `pmf(k+1)/pmf(k) = (N-k)/(k+1) * (k+alpha)/(N-k-1+beta)` with
/// `N = n - 1`, then rescaled so the largest weight is 1.
#[expect(
    clippy::cast_precision_loss,
    reason = "variant indices are tiny compared to f64 precision"
)]
pub fn beta_binomial(n: usize, alpha: f64, beta: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let big_n = (n - 1) as f64;
    let mut logs = Vec::with_capacity(n);
    let mut log_p = 0.0;
    logs.push(log_p);
    for k in 0..n - 1 {
        let k = k as f64;
        log_p += ((big_n - k) / (k + 1.0)).ln() + ((k + alpha) / (big_n - k - 1.0 + beta)).ln();
        logs.push(log_p);
    }
    let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    logs.into_iter().map(|l| (l - max).exp()).collect()
}

#[derive(Clone, Debug, Default)]
pub struct WeightTable {
    tables: FxHashMap<Category, Vec<f64>>,
    pinned: FxHashMap<Category, FxHashSet<OpKind>>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_parametrized(&self, category: Category) -> bool {
        self.tables.contains_key(&category)
    }

    /// Install weights for `category`, re-applying its pinned zeros.
    ///
    /// `weights` is aligned with the category's members.
    pub fn install(&mut self, category: Category, mut weights: Vec<f64>) {
        let members = category.members();
        debug_assert_eq!(weights.len(), members.len(), "weights for {category}");
        if let Some(pinned) = self.pinned.get(&category) {
            for (w, kind) in weights.iter_mut().zip(members) {
                if pinned.contains(kind) {
                    *w = 0.0;
                }
            }
        }
        self.tables.insert(category, weights);
    }

    /// Pin `kind`'s weight in `category` to 0. Idempotent.
    ///
    /// The table must be parametrized first.
    pub fn set_zero_probability(&mut self, category: Category, kind: OpKind) {
        self.pinned.entry(category).or_default().insert(kind);
        let members = category.members();
        if let Some(weights) = self.tables.get_mut(&category) {
            if let Some(pos) = members.iter().position(|&k| k == kind) {
                weights[pos] = 0.0;
            }
        }
    }

    pub fn weight(&self, category: Category, kind: OpKind) -> Option<f64> {
        let pos = category.members().iter().position(|&k| k == kind)?;
        self.tables.get(&category).map(|w| w[pos])
    }

    pub fn weights(&self, category: Category) -> Option<&[f64]> {
        self.tables.get(&category).map(Vec::as_slice)
    }

    /// Draw a variant proportionally to its weight.
    ///
    /// `None` if the table is missing or has no positive weight left.
    pub fn sample(&self, category: Category, rng: &mut impl Rng) -> Option<OpKind> {
        let weights = self.tables.get(&category)?;
        // Fails when no weight is positive; weights are finite and
        // non-negative by construction.
        let dist = WeightedIndex::new(weights).ok()?;
        category.members().get(dist.sample(rng)).copied()
    }
}

#[cfg(test)]
mod tests;
