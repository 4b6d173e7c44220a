use thiserror::Error;

/// Failures reported by the solver, the spline builder and the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Malformed caller data: unsorted or duplicated nodes, too few nodes,
    /// mismatched lengths, missing boundary slopes.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Forward elimination hit a pivot that is zero or below the configured epsilon.
    #[error("Singular system: pivot {pivot:e} in row {row} is not above {epsilon:e}")]
    SingularSystem { row: usize, pivot: f64, epsilon: f64 },

    #[error("x = {x} is outside of the spline domain [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },
}

impl SplineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SplineError::InvalidInput(message.into())
    }
}
