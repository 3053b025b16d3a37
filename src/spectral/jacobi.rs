use std::cmp::Ordering;

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SpkError};

const MAX_ROTATIONS: usize = 100;
const CONVERGENCE_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiConfig {
    pub max_rotations: usize,
    pub epsilon: f64,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self {
            max_rotations: MAX_ROTATIONS,
            epsilon: CONVERGENCE_EPSILON,
        }
    }
}

/// Eigenvalues with their eigenvectors stored as the columns of `eigenvectors`.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    pub eigenvalues: DVector<f64>,
    pub eigenvectors: DMatrix<f64>,
}

impl EigenDecomposition {
    /// Reorder eigenpairs by ascending eigenvalue. Equal values keep their order.
    pub fn sorted_ascending(&self) -> Self {
        let n = self.eigenvalues.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            self.eigenvalues[a]
                .partial_cmp(&self.eigenvalues[b])
                .unwrap_or(Ordering::Equal)
        });

        let eigenvalues = DVector::from_iterator(n, order.iter().map(|&i| self.eigenvalues[i]));
        let mut eigenvectors = DMatrix::zeros(self.eigenvectors.nrows(), n);
        for (target, &source) in order.iter().enumerate() {
            eigenvectors.set_column(target, &self.eigenvectors.column(source));
        }
        Self {
            eigenvalues,
            eigenvectors,
        }
    }
}

/// Jacobi eigenvalue algorithm for real symmetric matrices.
pub struct JacobiSolver {
    config: JacobiConfig,
}

impl JacobiSolver {
    pub fn new(config: JacobiConfig) -> Self {
        Self { config }
    }

    pub fn decompose(&self, matrix: &DMatrix<f64>) -> Result<EigenDecomposition> {
        if matrix.nrows() != matrix.ncols() {
            return Err(SpkError::generic(format!(
                "jacobi expects a square matrix, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let n = matrix.nrows();
        let mut a = matrix.clone();
        let mut v = DMatrix::identity(n, n);
        let mut rotations = 0usize;

        while rotations < self.config.max_rotations {
            let Some((i, j)) = pivot(&a) else {
                break;
            };
            let off_before = off_squared(&a);
            let (c, s) = rotation(&a, i, j);
            rotate(&mut a, i, j, c, s);
            rotate_vectors(&mut v, i, j, c, s);
            rotations += 1;

            if off_before - off_squared(&a) <= self.config.epsilon {
                break;
            }
        }
        debug!("jacobi finished after {} rotations (n = {})", rotations, n);

        Ok(EigenDecomposition {
            eigenvalues: a.diagonal(),
            eigenvectors: v,
        })
    }
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self::new(JacobiConfig::default())
    }
}

/// Sum of squares of the off-diagonal entries.
pub fn off_squared(matrix: &DMatrix<f64>) -> f64 {
    let mut off = 0.0;
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            if i != j {
                off += matrix[(i, j)] * matrix[(i, j)];
            }
        }
    }
    off
}

/// Upper-triangle position of the largest off-diagonal magnitude, if any is non-zero.
fn pivot(matrix: &DMatrix<f64>) -> Option<(usize, usize)> {
    let n = matrix.nrows();
    let mut best: Option<(usize, usize)> = None;
    let mut best_value = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let value = matrix[(i, j)].abs();
            if value > best_value {
                best_value = value;
                best = Some((i, j));
            }
        }
    }
    best
}

fn sign(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn rotation(a: &DMatrix<f64>, i: usize, j: usize) -> (f64, f64) {
    let theta = (a[(j, j)] - a[(i, i)]) / (2.0 * a[(i, j)]);
    let t = sign(theta) / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    (c, t * c)
}

/// A <- P^T A P for the rotation P acting on rows/columns i and j.
fn rotate(a: &mut DMatrix<f64>, i: usize, j: usize, c: f64, s: f64) {
    let n = a.nrows();
    let a_ii = a[(i, i)];
    let a_jj = a[(j, j)];
    let a_ij = a[(i, j)];

    for r in 0..n {
        if r == i || r == j {
            continue;
        }
        let a_ri = a[(r, i)];
        let a_rj = a[(r, j)];
        let new_ri = c * a_ri - s * a_rj;
        let new_rj = c * a_rj + s * a_ri;
        a[(r, i)] = new_ri;
        a[(i, r)] = new_ri;
        a[(r, j)] = new_rj;
        a[(j, r)] = new_rj;
    }

    a[(i, i)] = c * c * a_ii + s * s * a_jj - 2.0 * s * c * a_ij;
    a[(j, j)] = s * s * a_ii + c * c * a_jj + 2.0 * s * c * a_ij;
    a[(i, j)] = 0.0;
    a[(j, i)] = 0.0;
}

/// V <- V P.
fn rotate_vectors(v: &mut DMatrix<f64>, i: usize, j: usize, c: f64, s: f64) {
    for k in 0..v.nrows() {
        let v_ki = v[(k, i)];
        let v_kj = v[(k, j)];
        v[(k, i)] = c * v_ki - s * v_kj;
        v[(k, j)] = s * v_ki + c * v_kj;
    }
}
