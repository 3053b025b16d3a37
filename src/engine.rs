use nalgebra::DMatrix;

use crate::cluster::{LloydRefiner, RefineParams};
use crate::error::Result;
use crate::matrix::PointMatrix;
use crate::spectral::{
    AffinityBuilder, EigenDecomposition, JacobiConfig, JacobiSolver, NormalizedLaplacianBuilder,
    SpectralEmbedding,
};

/// Numerical operations the dispatcher routes requests to.
pub trait SpectralEngine {
    fn adjacency(&self, points: &PointMatrix) -> Result<DMatrix<f64>>;

    fn degree(&self, points: &PointMatrix) -> Result<DMatrix<f64>>;

    fn laplacian(&self, points: &PointMatrix) -> Result<DMatrix<f64>>;

    fn jacobi(&self, symmetric: &DMatrix<f64>) -> Result<EigenDecomposition>;

    /// `k == 0` asks the engine to choose the width itself.
    fn reduced_embedding(&self, points: &PointMatrix, k: usize) -> Result<PointMatrix>;

    fn refine(
        &self,
        seeds: &[usize],
        points: &PointMatrix,
        params: RefineParams,
    ) -> Result<Vec<Vec<f64>>>;
}

/// In-process implementation backed by the `spectral` and `cluster` modules.
#[derive(Default)]
pub struct NativeEngine {
    solver: JacobiSolver,
}

impl NativeEngine {
    pub fn new(jacobi: JacobiConfig) -> Self {
        Self {
            solver: JacobiSolver::new(jacobi),
        }
    }
}

impl SpectralEngine for NativeEngine {
    fn adjacency(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
        Ok(AffinityBuilder::weighted_adjacency(points))
    }

    fn degree(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
        Ok(AffinityBuilder::degree(points))
    }

    fn laplacian(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
        Ok(NormalizedLaplacianBuilder::build(points))
    }

    fn jacobi(&self, symmetric: &DMatrix<f64>) -> Result<EigenDecomposition> {
        self.solver.decompose(symmetric)
    }

    fn reduced_embedding(&self, points: &PointMatrix, k: usize) -> Result<PointMatrix> {
        SpectralEmbedding::new(&self.solver).reduce(points, k)
    }

    fn refine(
        &self,
        seeds: &[usize],
        points: &PointMatrix,
        params: RefineParams,
    ) -> Result<Vec<Vec<f64>>> {
        LloydRefiner::refine(seeds, points, params)
    }
}
