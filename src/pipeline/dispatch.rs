use std::time::Instant;

use log::info;
use nalgebra::DMatrix;

use crate::cluster::refine::{DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS};
use crate::cluster::seeding::DEFAULT_SEED;
use crate::cluster::{KMeansPlusPlus, RefineParams};
use crate::engine::{NativeEngine, SpectralEngine};
use crate::error::Result;
use crate::matrix::matrix_rows;
use crate::pipeline::format::ResultFormatter;
use crate::pipeline::goal::Goal;
use crate::pipeline::validate::ValidatedRequest;
use crate::spectral::{EigenDecomposition, JacobiConfig};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub seed: u64,
    pub max_iterations: usize,
    pub epsilon: f64,
    pub jacobi: JacobiConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            jacobi: JacobiConfig::default(),
        }
    }
}

/// Result of one dispatched goal, shaped per branch.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalOutput {
    Matrix(DMatrix<f64>),
    Eigen(EigenDecomposition),
    Clustering {
        seeds: Vec<usize>,
        centroids: Vec<Vec<f64>>,
    },
}

impl GoalOutput {
    /// Numeric rows in print order. The clustering seed line is not included.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        match self {
            GoalOutput::Matrix(matrix) => matrix_rows(matrix),
            GoalOutput::Eigen(eigen) => {
                let mut rows = Vec::with_capacity(eigen.eigenvectors.nrows() + 1);
                rows.push(eigen.eigenvalues.iter().copied().collect());
                rows.extend(matrix_rows(&eigen.eigenvectors));
                rows
            }
            GoalOutput::Clustering { centroids, .. } => centroids.clone(),
        }
    }

    pub fn render(&self) -> String {
        let body = ResultFormatter::format_rows(&self.rows());
        match self {
            GoalOutput::Clustering { seeds, .. } => {
                let header = ResultFormatter::format_index_row(seeds);
                if body.is_empty() {
                    header
                } else {
                    format!("{header}\n{body}")
                }
            }
            _ => body,
        }
    }
}

/// Routes a validated request to the engine call for its goal.
pub struct GoalDispatcher<E = NativeEngine> {
    engine: E,
    config: PipelineConfig,
}

impl GoalDispatcher<NativeEngine> {
    pub fn native(config: PipelineConfig) -> Self {
        let engine = NativeEngine::new(config.jacobi);
        Self::new(engine, config)
    }
}

impl<E: SpectralEngine> GoalDispatcher<E> {
    pub fn new(engine: E, config: PipelineConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn dispatch(&self, request: &ValidatedRequest) -> Result<GoalOutput> {
        let start = Instant::now();
        let points = &request.points;
        info!(
            "Dispatching goal {} over {} points of dimension {}",
            request.goal.kind(),
            points.nrows(),
            points.ncols()
        );

        let output = match request.goal {
            Goal::WeightedAdjacency => GoalOutput::Matrix(self.engine.adjacency(points)?),
            Goal::Degree => GoalOutput::Matrix(self.engine.degree(points)?),
            Goal::NormalizedLaplacian => GoalOutput::Matrix(self.engine.laplacian(points)?),
            Goal::Eigendecomposition => {
                GoalOutput::Eigen(self.engine.jacobi(points.as_matrix())?)
            }
            Goal::SpectralClustering { k } => {
                let embedding = self.engine.reduced_embedding(points, k)?;
                let dims = embedding.ncols();
                let k = if k > 0 { k } else { dims };
                let seeds = KMeansPlusPlus::new(self.config.seed).select(k, &embedding)?;
                let centroids = self.engine.refine(
                    &seeds,
                    &embedding,
                    RefineParams {
                        dims,
                        k,
                        max_iterations: self.config.max_iterations,
                        epsilon: self.config.epsilon,
                    },
                )?;
                GoalOutput::Clustering { seeds, centroids }
            }
        };

        info!(
            "Goal {} completed in {:?}",
            request.goal.kind(),
            start.elapsed()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use nalgebra::DVector;

    use crate::error::{ErrorKind, SpkError};
    use crate::matrix::PointMatrix;

    #[derive(Default)]
    struct RecordingEngine {
        calls: RefCell<Vec<String>>,
        fail_refine: bool,
    }

    impl RecordingEngine {
        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }
    }

    impl SpectralEngine for RecordingEngine {
        fn adjacency(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
            self.record("adjacency");
            Ok(DMatrix::from_element(points.nrows(), points.nrows(), 1.0))
        }

        fn degree(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
            self.record("degree");
            Ok(DMatrix::from_element(points.nrows(), points.nrows(), 2.0))
        }

        fn laplacian(&self, points: &PointMatrix) -> Result<DMatrix<f64>> {
            self.record("laplacian");
            Ok(DMatrix::from_element(points.nrows(), points.nrows(), 3.0))
        }

        fn jacobi(&self, symmetric: &DMatrix<f64>) -> Result<EigenDecomposition> {
            self.record("jacobi");
            let n = symmetric.nrows();
            Ok(EigenDecomposition {
                eigenvalues: DVector::from_element(n, 0.5),
                eigenvectors: DMatrix::identity(n, n),
            })
        }

        fn reduced_embedding(&self, points: &PointMatrix, k: usize) -> Result<PointMatrix> {
            self.record(format!("embedding k={k}"));
            let width = if k == 0 { 2 } else { k };
            let rows: Vec<Vec<f64>> = (0..points.nrows())
                .map(|i| (0..width).map(|j| (i * width + j) as f64).collect())
                .collect();
            PointMatrix::from_rows(&rows)
        }

        fn refine(
            &self,
            seeds: &[usize],
            points: &PointMatrix,
            params: RefineParams,
        ) -> Result<Vec<Vec<f64>>> {
            self.record(format!(
                "refine dims={} k={} iter={} eps={}",
                params.dims, params.k, params.max_iterations, params.epsilon
            ));
            if self.fail_refine {
                return Err(SpkError::generic("refinement exploded"));
            }
            Ok(seeds.iter().map(|&s| points.row(s)).collect())
        }
    }

    fn request(goal: Goal, n: usize, d: usize) -> ValidatedRequest {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..d).map(|j| (i + j) as f64).collect())
            .collect();
        ValidatedRequest {
            goal,
            points: PointMatrix::from_rows(&rows).expect("points"),
        }
    }

    #[test]
    fn matrix_goals_route_to_matching_engine_call() {
        let dispatcher = GoalDispatcher::new(RecordingEngine::default(), PipelineConfig::default());
        for (goal, call, value) in [
            (Goal::WeightedAdjacency, "adjacency", 1.0),
            (Goal::Degree, "degree", 2.0),
            (Goal::NormalizedLaplacian, "laplacian", 3.0),
        ] {
            let output = dispatcher.dispatch(&request(goal, 3, 2)).expect("output");
            assert_eq!(dispatcher.engine().calls.borrow().last().unwrap(), call);
            assert_eq!(output, GoalOutput::Matrix(DMatrix::from_element(3, 3, value)));
        }
    }

    #[test]
    fn eigen_rows_start_with_eigenvalues() {
        let dispatcher = GoalDispatcher::new(RecordingEngine::default(), PipelineConfig::default());
        let output = dispatcher
            .dispatch(&request(Goal::Eigendecomposition, 2, 2))
            .expect("output");
        assert_eq!(
            output.rows(),
            vec![vec![0.5, 0.5], vec![1.0, 0.0], vec![0.0, 1.0]]
        );
    }

    #[test]
    fn clustering_passes_refine_parameters() {
        let dispatcher = GoalDispatcher::new(RecordingEngine::default(), PipelineConfig::default());
        let output = dispatcher
            .dispatch(&request(Goal::SpectralClustering { k: 3 }, 6, 2))
            .expect("output");
        let calls = dispatcher.engine().calls.borrow().clone();
        assert_eq!(calls, vec!["embedding k=3", "refine dims=3 k=3 iter=300 eps=0"]);
        match output {
            GoalOutput::Clustering { seeds, centroids } => {
                assert_eq!(seeds.len(), 3);
                assert_eq!(centroids.len(), 3);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn clustering_auto_k_uses_embedding_width() {
        let dispatcher = GoalDispatcher::new(RecordingEngine::default(), PipelineConfig::default());
        let output = dispatcher
            .dispatch(&request(Goal::SpectralClustering { k: 0 }, 5, 2))
            .expect("output");
        let calls = dispatcher.engine().calls.borrow().clone();
        assert_eq!(calls[0], "embedding k=0");
        assert_eq!(calls[1], "refine dims=2 k=2 iter=300 eps=0");
        let rendered = output.render();
        let first_line = rendered.lines().next().expect("seed line");
        assert!(!first_line.contains('.'), "seed line must be integers: {first_line}");
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn engine_errors_propagate_unchanged() {
        let engine = RecordingEngine {
            fail_refine: true,
            ..RecordingEngine::default()
        };
        let dispatcher = GoalDispatcher::new(engine, PipelineConfig::default());
        let err = dispatcher
            .dispatch(&request(Goal::SpectralClustering { k: 2 }, 4, 2))
            .unwrap_err();
        assert_eq!(err, SpkError::generic("refinement exploded"));
        assert_eq!(err.kind(), ErrorKind::GenericProcessing);
    }

    #[test]
    fn native_dispatch_is_reproducible() {
        let dispatcher = GoalDispatcher::native(PipelineConfig::default());
        let req = request(Goal::SpectralClustering { k: 2 }, 6, 3);
        let first = dispatcher.dispatch(&req).expect("first run").render();
        let second = dispatcher.dispatch(&req).expect("second run").render();
        assert_eq!(first, second);
    }
}
