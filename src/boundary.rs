use crate::error::SplineError;

/// Condition closing the spline system at both ends of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryCondition {
    /// Second derivative vanishes at both end nodes.
    #[default]
    Natural,
    /// First derivative is fixed at both end nodes: `S'(x_0) = start_slope`, `S'(x_n) = end_slope`.
    Clamped { start_slope: f64, end_slope: f64 },
}

impl BoundaryCondition {
    pub fn clamped(start_slope: f64, end_slope: f64) -> Self {
        BoundaryCondition::Clamped { start_slope, end_slope }
    }

    /// Builds [BoundaryCondition::Clamped] from optionally supplied end slopes.
    /// # Example
    /// ```
    /// use tridiagonal_spline::BoundaryCondition;
    ///
    /// assert!(BoundaryCondition::from_slopes(Some(1.0), Some(-1.0)).is_ok());
    /// assert!(BoundaryCondition::from_slopes(Some(1.0), None).is_err());
    /// ```
    /// # Errors
    /// [SplineError::InvalidInput] when any of the slopes is missing.
    pub fn from_slopes(
        start_slope: Option<f64>,
        end_slope: Option<f64>,
    ) -> Result<Self, SplineError> {
        match (start_slope, end_slope) {
            (Some(start_slope), Some(end_slope)) => {
                Ok(BoundaryCondition::Clamped { start_slope, end_slope })
            }
            (None, _) => {
                Err(SplineError::invalid("clamped boundary condition requires the start slope"))
            }
            (_, None) => {
                Err(SplineError::invalid("clamped boundary condition requires the end slope"))
            }
        }
    }

    pub fn is_natural(&self) -> bool {
        matches!(self, BoundaryCondition::Natural)
    }

    pub(crate) fn validate(&self) -> Result<(), SplineError> {
        if let BoundaryCondition::Clamped { start_slope, end_slope } = self {
            if !start_slope.is_finite() || !end_slope.is_finite() {
                return Err(SplineError::invalid(format!(
                    "clamped slopes must be finite, got {} and {}",
                    start_slope, end_slope
                )));
            }
        }
        Ok(())
    }
}
