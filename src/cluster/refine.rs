use log::{debug, info};

use crate::error::{Result, SpkError};
use crate::matrix::PointMatrix;

pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_EPSILON: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineParams {
    pub dims: usize,
    pub k: usize,
    pub max_iterations: usize,
    pub epsilon: f64,
}

/// Lloyd iteration started from seeded rows.
pub struct LloydRefiner;

impl LloydRefiner {
    pub fn refine(
        seeds: &[usize],
        points: &PointMatrix,
        params: RefineParams,
    ) -> Result<Vec<Vec<f64>>> {
        let n = points.nrows();
        if seeds.len() != params.k {
            return Err(SpkError::generic(format!(
                "expected {} seed indices, got {}",
                params.k,
                seeds.len()
            )));
        }
        if points.ncols() != params.dims {
            return Err(SpkError::generic(format!(
                "points have {} dimensions, expected {}",
                points.ncols(),
                params.dims
            )));
        }
        if let Some(&bad) = seeds.iter().find(|&&s| s >= n) {
            return Err(SpkError::generic(format!(
                "seed index {bad} out of range for {n} points"
            )));
        }

        let mut centroids: Vec<Vec<f64>> = seeds.iter().map(|&s| points.row(s)).collect();
        let mut labels = vec![0usize; n];

        for iteration in 0..params.max_iterations {
            for (i, label) in labels.iter_mut().enumerate() {
                *label = nearest(points, i, &centroids);
            }

            let mut sums = vec![vec![0.0; params.dims]; params.k];
            let mut counts = vec![0usize; params.k];
            for (i, &label) in labels.iter().enumerate() {
                for (slot, value) in sums[label].iter_mut().zip(points.row(i)) {
                    *slot += value;
                }
                counts[label] += 1;
            }

            let mut max_shift = 0.0f64;
            for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
                if count == 0 {
                    continue;
                }
                let updated: Vec<f64> = sum.into_iter().map(|v| v / count as f64).collect();
                let shift = centroid
                    .iter()
                    .zip(updated.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                max_shift = max_shift.max(shift);
                *centroid = updated;
            }
            debug!("lloyd iteration {}: max centroid shift {}", iteration, max_shift);

            if max_shift <= params.epsilon {
                info!("lloyd converged after {} iterations", iteration + 1);
                break;
            }
        }

        Ok(centroids)
    }
}

fn nearest(points: &PointMatrix, row: usize, centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = points.squared_distance_to(row, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blobs() -> PointMatrix {
        PointMatrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
            vec![11.0, 10.0],
        ])
        .expect("points")
    }

    fn params(k: usize) -> RefineParams {
        RefineParams {
            dims: 2,
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
        }
    }

    #[test]
    fn converges_to_blob_means() {
        let centroids = LloydRefiner::refine(&[0, 3], &blobs(), params(2)).expect("centroids");
        assert_eq!(centroids.len(), 2);
        assert_relative_eq!(centroids[0][0], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centroids[0][1], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centroids[1][0], 31.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centroids[1][1], 31.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_order_follows_seed_order() {
        let centroids = LloydRefiner::refine(&[4, 1], &blobs(), params(2)).expect("centroids");
        assert!(centroids[0][0] > 5.0);
        assert!(centroids[1][0] < 5.0);
    }

    #[test]
    fn zero_iterations_returns_seed_rows() {
        let mut p = params(2);
        p.max_iterations = 0;
        let centroids = LloydRefiner::refine(&[1, 5], &blobs(), p).expect("centroids");
        assert_eq!(centroids, vec![vec![0.0, 1.0], vec![11.0, 10.0]]);
    }

    #[test]
    fn mismatched_arguments_are_rejected() {
        assert!(LloydRefiner::refine(&[0], &blobs(), params(2)).is_err());
        assert!(LloydRefiner::refine(&[0, 9], &blobs(), params(2)).is_err());
        let mut p = params(2);
        p.dims = 3;
        assert!(LloydRefiner::refine(&[0, 1], &blobs(), p).is_err());
    }
}
