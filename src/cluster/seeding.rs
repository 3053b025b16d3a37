use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{Result, SpkError};
use crate::matrix::PointMatrix;

pub const DEFAULT_SEED: u64 = 0;

/// k-means++ centroid seeding over the rows of a point matrix.
///
/// Every call to [`KMeansPlusPlus::select`] starts from a freshly seeded generator,
/// so identical inputs always produce the same index sequence.
#[derive(Debug, Clone)]
pub struct KMeansPlusPlus {
    seed: u64,
}

impl Default for KMeansPlusPlus {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl KMeansPlusPlus {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Pick `k` row indices. The first is uniform, the rest weighted by squared distance
    /// to the nearest index already picked.
    pub fn select(&self, k: usize, points: &PointMatrix) -> Result<Vec<usize>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
        Self::select_with_rng(k, points, &mut rng)
    }

    pub fn select_with_rng<R: Rng>(
        k: usize,
        points: &PointMatrix,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let n = points.nrows();
        if k == 0 || k > n {
            return Err(SpkError::generic(format!(
                "k-means++ needs 1 <= k <= n, got k = {k}, n = {n}"
            )));
        }

        let mut chosen = Vec::with_capacity(k);
        chosen.push(rng.gen_range(0..n));

        let mut distances = vec![f64::INFINITY; n];
        while chosen.len() < k {
            min_distances(points, &chosen, &mut distances);
            let probabilities = probabilities(&distances)?;
            let weighted = WeightedIndex::new(&probabilities)
                .map_err(|err| SpkError::generic(format!("invalid seeding weights: {err}")))?;
            let next = weighted.sample(rng);
            debug!("k-means++ round {}: picked index {}", chosen.len(), next);
            chosen.push(next);
        }
        Ok(chosen)
    }
}

/// Fill `distances[l]` with the squared distance from point `l` to its nearest chosen centroid.
pub fn min_distances(points: &PointMatrix, chosen: &[usize], distances: &mut [f64]) {
    for (l, slot) in distances.iter_mut().enumerate() {
        *slot = chosen
            .iter()
            .map(|&c| points.squared_distance(l, c))
            .fold(f64::INFINITY, f64::min);
    }
}

/// Normalise a distance vector into a probability distribution.
///
/// Fails when the distances sum to zero, which happens once every point coincides with
/// some chosen centroid. A sum that overflows to infinity (coordinates near `f64::MAX`)
/// also fails, with its own message, since no finite distribution can be formed from it.
pub fn probabilities(distances: &[f64]) -> Result<Vec<f64>> {
    let total: f64 = distances.iter().sum();
    if !total.is_finite() {
        return Err(SpkError::generic(format!(
            "squared distances overflowed to D_sum = {total}; coordinates are too large to seed"
        )));
    }
    if total <= 0.0 {
        return Err(SpkError::generic(format!(
            "reached D_sum = {total}, every point coincides with a chosen centroid"
        )));
    }
    Ok(distances.iter().map(|d| d / total).collect())
}
