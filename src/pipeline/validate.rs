use crate::error::{Result, SpkError};
use crate::matrix::PointMatrix;
use crate::pipeline::goal::{Goal, GoalKind};

/// A request that passed every precondition for its goal.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub goal: Goal,
    pub points: PointMatrix,
}

/// Checks (k, goal, points) before any numerical work starts.
pub struct InputValidator;

impl InputValidator {
    pub fn validate(k: Option<i64>, goal: &str, points: PointMatrix) -> Result<ValidatedRequest> {
        let n = points.nrows();
        let d = points.ncols();
        if n == 0 {
            return Err(SpkError::generic(
                "data, as parsed, is empty - nothing to work on",
            ));
        }

        let goal = match goal.parse::<GoalKind>()? {
            GoalKind::SpectralClustering => {
                let k = k.ok_or_else(|| SpkError::invalid("expected an integer k for goal spk"))?;
                let k = usize::try_from(k)
                    .ok()
                    .filter(|&k| k < n)
                    .ok_or_else(|| {
                        SpkError::invalid(format!(
                            "the following must hold: 0 <= k < n, but k = {k} and n = {n}"
                        ))
                    })?;
                // Column 0 is reserved for the point index.
                if d < 2 {
                    return Err(SpkError::generic(
                        "points need at least one dimension besides the index column",
                    ));
                }
                Goal::SpectralClustering { k }
            }
            GoalKind::WeightedAdjacency => {
                require_dimension(d)?;
                Goal::WeightedAdjacency
            }
            GoalKind::Degree => {
                require_dimension(d)?;
                Goal::Degree
            }
            GoalKind::NormalizedLaplacian => {
                require_dimension(d)?;
                Goal::NormalizedLaplacian
            }
            GoalKind::Eigendecomposition => {
                if !points.is_square() {
                    return Err(SpkError::generic(format!(
                        "jacobi expects a symmetric matrix, but n != d ({n} != {d})"
                    )));
                }
                Goal::Eigendecomposition
            }
        };

        Ok(ValidatedRequest { goal, points })
    }
}

fn require_dimension(d: usize) -> Result<()> {
    if d < 1 {
        return Err(SpkError::generic("points need at least one dimension"));
    }
    Ok(())
}
