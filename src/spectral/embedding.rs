use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SpkError};
use crate::matrix::PointMatrix;
use crate::spectral::jacobi::JacobiSolver;
use crate::spectral::normalized_laplacian::NormalizedLaplacianBuilder;

/// Eigengap heuristic over ascending eigenvalues.
///
/// Returns the 1-based position `i <= n / 2` maximising `lambda[i] - lambda[i - 1]`,
/// keeping the first such position on ties. Never returns less than 1.
pub fn eigengap_k(sorted_eigenvalues: &DVector<f64>) -> usize {
    let n = sorted_eigenvalues.len();
    let half = n / 2;
    let mut best_k = 1;
    let mut best_gap = f64::NEG_INFINITY;
    for i in 1..=half {
        let gap = sorted_eigenvalues[i] - sorted_eigenvalues[i - 1];
        if gap > best_gap {
            best_gap = gap;
            best_k = i;
        }
    }
    best_k
}

/// Normalize each row to unit length. Rows of all zeros are left as they are.
pub fn normalize_rows(matrix: &mut DMatrix<f64>) {
    for mut row in matrix.row_iter_mut() {
        let norm = row.norm();
        if norm > 0.0 {
            row /= norm;
        }
    }
}

/// Spectral embedding T: rows of the first k Laplacian eigenvectors, unit-normalised.
pub struct SpectralEmbedding<'a> {
    solver: &'a JacobiSolver,
}

impl<'a> SpectralEmbedding<'a> {
    pub fn new(solver: &'a JacobiSolver) -> Self {
        Self { solver }
    }

    /// `k == 0` lets the eigengap heuristic decide the embedding width.
    pub fn reduce(&self, points: &PointMatrix, k: usize) -> Result<PointMatrix> {
        let n = points.nrows();
        if n == 0 {
            return Err(SpkError::generic("cannot embed an empty point set"));
        }
        if k > n {
            return Err(SpkError::generic(format!(
                "embedding width {k} exceeds point count {n}"
            )));
        }

        let laplacian = NormalizedLaplacianBuilder::build(points);
        let eigen = self.solver.decompose(&laplacian)?.sorted_ascending();
        let width = if k == 0 {
            eigengap_k(&eigen.eigenvalues)
        } else {
            k
        };
        debug!("spectral embedding width {} for {} points", width, n);

        let mut embedding = eigen.eigenvectors.columns(0, width).into_owned();
        normalize_rows(&mut embedding);
        Ok(PointMatrix::from_matrix(embedding))
    }
}
