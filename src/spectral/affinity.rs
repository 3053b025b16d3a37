use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::matrix::PointMatrix;

/// Builds the weighted adjacency matrix \( W_{ij} = e^{-\lVert x_i - x_j \rVert / 2} \).
pub struct AffinityBuilder;

impl AffinityBuilder {
    pub fn weighted_adjacency(points: &PointMatrix) -> DMatrix<f64> {
        let n = points.nrows();
        if n == 0 {
            return DMatrix::zeros(0, 0);
        }

        let mut weights = vec![0.0; n * n];
        weights.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                if i == j {
                    continue;
                }
                let distance = points.squared_distance(i, j).sqrt();
                *cell = (-distance / 2.0).exp();
            }
        });
        DMatrix::from_row_slice(n, n, &weights)
    }

    /// Diagonal degree matrix of a weighted adjacency matrix.
    pub fn degree_of(adjacency: &DMatrix<f64>) -> DMatrix<f64> {
        let degrees: Vec<f64> = adjacency.row_iter().map(|row| row.sum()).collect();
        DMatrix::from_diagonal(&nalgebra::DVector::from_vec(degrees))
    }

    pub fn degree(points: &PointMatrix) -> DMatrix<f64> {
        Self::degree_of(&Self::weighted_adjacency(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> PointMatrix {
        PointMatrix::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 2.0]]).expect("points")
    }

    #[test]
    fn adjacency_is_symmetric_with_zero_diagonal() {
        let w = AffinityBuilder::weighted_adjacency(&triangle());
        for i in 0..3 {
            assert_eq!(w[(i, i)], 0.0);
            for j in 0..3 {
                assert_relative_eq!(w[(i, j)], w[(j, i)], epsilon = 1e-12);
            }
        }
        assert_relative_eq!(w[(0, 1)], (-2.5f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(w[(0, 2)], (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn degree_sums_adjacency_rows() {
        let points = triangle();
        let w = AffinityBuilder::weighted_adjacency(&points);
        let d = AffinityBuilder::degree(&points);
        for i in 0..3 {
            assert_relative_eq!(d[(i, i)], w.row(i).sum(), epsilon = 1e-12);
            for j in 0..3 {
                if i != j {
                    assert_eq!(d[(i, j)], 0.0);
                }
            }
        }
    }
}
