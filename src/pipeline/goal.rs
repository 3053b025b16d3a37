use std::fmt;
use std::str::FromStr;

use crate::error::SpkError;

/// Goal names as they arrive on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalKind {
    WeightedAdjacency,
    Degree,
    NormalizedLaplacian,
    Eigendecomposition,
    SpectralClustering,
}

impl GoalKind {
    pub const ALL: [GoalKind; 5] = [
        GoalKind::WeightedAdjacency,
        GoalKind::Degree,
        GoalKind::NormalizedLaplacian,
        GoalKind::Eigendecomposition,
        GoalKind::SpectralClustering,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GoalKind::WeightedAdjacency => "wam",
            GoalKind::Degree => "ddg",
            GoalKind::NormalizedLaplacian => "lnorm",
            GoalKind::Eigendecomposition => "jacobi",
            GoalKind::SpectralClustering => "spk",
        }
    }

    fn long_name(self) -> &'static str {
        match self {
            GoalKind::WeightedAdjacency => "weighted-adjacency",
            GoalKind::Degree => "degree",
            GoalKind::NormalizedLaplacian => "normalized-laplacian",
            GoalKind::Eigendecomposition => "eigendecomposition",
            GoalKind::SpectralClustering => "spectral-clustering",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GoalKind {
    type Err = SpkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GoalKind::ALL
            .into_iter()
            .find(|kind| kind.name() == value || kind.long_name() == value)
            .ok_or_else(|| SpkError::invalid(format!("unrecognized goal specified - {value}")))
    }
}

/// A validated goal carrying only what its branch needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    WeightedAdjacency,
    Degree,
    NormalizedLaplacian,
    Eigendecomposition,
    /// `k == 0` defers the cluster count to the eigengap heuristic.
    SpectralClustering { k: usize },
}

impl Goal {
    pub fn kind(&self) -> GoalKind {
        match self {
            Goal::WeightedAdjacency => GoalKind::WeightedAdjacency,
            Goal::Degree => GoalKind::Degree,
            Goal::NormalizedLaplacian => GoalKind::NormalizedLaplacian,
            Goal::Eigendecomposition => GoalKind::Eigendecomposition,
            Goal::SpectralClustering { .. } => GoalKind::SpectralClustering,
        }
    }
}
