pub mod affinity;
pub mod embedding;
pub mod jacobi;
pub mod normalized_laplacian;

pub use affinity::AffinityBuilder;
pub use embedding::{eigengap_k, SpectralEmbedding};
pub use jacobi::{EigenDecomposition, JacobiConfig, JacobiSolver};
pub use normalized_laplacian::NormalizedLaplacianBuilder;
