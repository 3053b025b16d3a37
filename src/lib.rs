pub mod cluster;
pub mod datasets;
pub mod engine;
pub mod error;
pub mod invocation;
pub mod matrix;
pub mod pipeline;
pub mod spectral;

pub use cluster::{KMeansPlusPlus, LloydRefiner, RefineParams};
pub use datasets::DatasetLoader;
pub use engine::{NativeEngine, SpectralEngine};
pub use error::{ErrorKind, Result, SpkError};
pub use invocation::{Invocation, Verbosity};
pub use matrix::PointMatrix;
pub use pipeline::{
    Goal, GoalDispatcher, GoalKind, GoalOutput, InputValidator, PipelineConfig, ResultFormatter,
    ValidatedRequest,
};
pub use spectral::{EigenDecomposition, JacobiConfig, JacobiSolver};
