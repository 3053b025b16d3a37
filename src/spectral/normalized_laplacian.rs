use nalgebra::DMatrix;

use crate::matrix::PointMatrix;
use crate::spectral::affinity::AffinityBuilder;

/// Responsible for constructing the normalized Laplacian \( L = I - D^{-1/2} W D^{-1/2} \).
pub struct NormalizedLaplacianBuilder;

impl NormalizedLaplacianBuilder {
    pub fn build(points: &PointMatrix) -> DMatrix<f64> {
        let adjacency = AffinityBuilder::weighted_adjacency(points);
        Self::from_adjacency(&adjacency)
    }

    pub fn from_adjacency(adjacency: &DMatrix<f64>) -> DMatrix<f64> {
        let node_count = adjacency.nrows();
        if node_count == 0 {
            return DMatrix::zeros(0, 0);
        }

        let inv_sqrt: Vec<f64> = adjacency
            .row_iter()
            .map(|row| {
                let degree = row.sum();
                if degree > 0.0 {
                    1.0 / degree.sqrt()
                } else {
                    0.0
                }
            })
            .collect();

        let mut normalized = DMatrix::identity(node_count, node_count);
        for i in 0..node_count {
            let scale_i = inv_sqrt[i];
            if scale_i == 0.0 {
                continue;
            }
            for j in 0..node_count {
                let scale_j = inv_sqrt[j];
                if scale_j == 0.0 {
                    continue;
                }
                normalized[(i, j)] -= adjacency[(i, j)] * scale_i * scale_j;
            }
        }
        normalized
    }
}
