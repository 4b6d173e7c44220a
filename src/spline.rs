use log::debug;
use nalgebra::DVector;

use crate::{
    boundary::BoundaryCondition,
    error::SplineError,
    node::{self, Node},
    segment::CubicSegment,
    tridiagonal::{SolverOptions, TridiagonalSystem},
};

/// Interpolating cubic spline. Holds the nodes, the step sizes and the second derivatives
/// (`gamma`) at every node; nothing is mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    steps: Vec<f64>,
    gamma: DVector<f64>,
    boundary: BoundaryCondition,
}

impl CubicSpline {
    /// Builds spline through `nodes` using default [SolverOptions].
    /// # Errors
    /// [SplineError::InvalidInput] when there are fewer than 2 nodes, x is not strictly increasing,
    /// any value is not finite or the nodes are too far apart for `f64`.
    pub fn new(nodes: &[Node], boundary: BoundaryCondition) -> Result<Self, SplineError> {
        Self::with_options(nodes, boundary, &SolverOptions::default())
    }

    /// Builds spline with custom [SolverOptions]. The spline systems are scaled to a unit
    /// diagonal before solving, so the pivot epsilon is relative to the diagonal and does not
    /// depend on node spacing.
    /// # Errors
    /// Same as [CubicSpline::new]. [SplineError::SingularSystem] is returned only when the pivot
    /// epsilon is close to 1 or above, beyond what the diagonal dominance of the system guarantees.
    pub fn with_options(
        nodes: &[Node],
        boundary: BoundaryCondition,
        options: &SolverOptions,
    ) -> Result<Self, SplineError> {
        node::validate_nodes(nodes)?;
        boundary.validate()?;

        let xs: Vec<f64> = nodes.iter().map(|n| n.get_x()).collect();
        let ys: Vec<f64> = nodes.iter().map(|n| n.get_y()).collect();
        let steps = node::steps(&xs)?;

        debug!("building {:?} cubic spline through {} nodes", boundary, xs.len());

        let gamma = match boundary {
            BoundaryCondition::Natural => natural_gamma(&ys, &steps, options)?,
            BoundaryCondition::Clamped { start_slope, end_slope } => {
                clamped_system(&ys, &steps, start_slope, end_slope)?
                    .with_unit_diagonal()
                    .solve(options)?
            }
        };

        if gamma.iter().any(|g| !g.is_finite()) {
            return Err(SplineError::invalid(
                "second derivatives overflow, node values or spacing are out of f64 range",
            ));
        }

        Ok(CubicSpline { xs, ys, steps, gamma, boundary })
    }

    /// Builds spline from separate coordinate slices.
    /// # Errors
    /// Same as [CubicSpline::new], additionally [SplineError::InvalidInput] when `xs` and `ys`
    /// differ in length.
    pub fn from_xy(
        xs: &[f64],
        ys: &[f64],
        boundary: BoundaryCondition,
    ) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::invalid(format!(
                "x and y must have equal length, got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        let nodes: Vec<Node> = xs.iter().zip(ys).map(|(x, y)| Node::new(*x, *y)).collect();
        Self::new(&nodes, boundary)
    }

    /// Value of the spline at `x`.
    /// # Errors
    /// [SplineError::OutOfDomain] when `x` lays outside of `[x_0, x_n]`.
    pub fn evaluate(&self, x: f64) -> Result<f64, SplineError> {
        self.check_in_range(x)?;
        Ok(self.segment(self.find_segment_index(x)).evaluate(x))
    }

    /// First derivative of the spline at `x`.
    pub fn derivative(&self, x: f64) -> Result<f64, SplineError> {
        self.check_in_range(x)?;
        Ok(self.segment(self.find_segment_index(x)).derivative(x))
    }

    /// Second derivative of the spline at `x`.
    pub fn second_derivative(&self, x: f64) -> Result<f64, SplineError> {
        self.check_in_range(x)?;
        Ok(self.segment(self.find_segment_index(x)).second_derivative(x))
    }

    /// Evaluates spline at every point of `x_vector`. Consecutive points are expected to be
    /// mostly sorted, previously found segment is checked first.
    /// # Errors
    /// [SplineError::OutOfDomain] for the first point outside of the domain, nothing is evaluated
    /// then.
    pub fn batch_evaluate(&self, x_vector: &[f64]) -> Result<Vec<f64>, SplineError> {
        for x in x_vector {
            self.check_in_range(*x)?;
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_segment_index_with_hint(index, *x);
            results.push(self.segment(index).evaluate(*x));
        }
        Ok(results)
    }

    /// Evaluates spline at any `x`. Outside of the domain the cubic of the nearest boundary
    /// segment is continued, inside it is equal to [CubicSpline::evaluate].
    pub fn extrapolate(&self, x: f64) -> f64 {
        self.segment(self.find_segment_index(x)).evaluate(x)
    }

    pub fn nodes_x(&self) -> &[f64] {
        &self.xs
    }

    pub fn nodes_y(&self) -> &[f64] {
        &self.ys
    }

    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// Second derivative values at the nodes.
    pub fn gamma(&self) -> &DVector<f64> {
        &self.gamma
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// `(x_0, x_n)`
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn segment_count(&self) -> usize {
        self.steps.len()
    }

    fn is_in_range(&self, x: f64) -> bool {
        let (min, max) = self.domain();
        min <= x && x <= max
    }

    fn check_in_range(&self, x: f64) -> Result<(), SplineError> {
        if self.is_in_range(x) {
            Ok(())
        } else {
            let (min, max) = self.domain();
            Err(SplineError::OutOfDomain { x, min, max })
        }
    }

    fn segment(&self, index: usize) -> CubicSegment {
        CubicSegment {
            x0: self.xs[index],
            x1: self.xs[index + 1],
            y0: self.ys[index],
            y1: self.ys[index + 1],
            gamma0: self.gamma[index],
            gamma1: self.gamma[index + 1],
            h: self.steps[index],
        }
    }

    /// Smallest `i` with `x <= x_{i+1}`, so a node shared by two segments belongs to the left one.
    /// Points left of the domain map to the first segment, right of it to the last one.
    fn find_segment_index(&self, x: f64) -> usize {
        let mut min = 0;
        let mut max = self.xs.len() - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x <= self.xs[mid] {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_segment_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if self.is_in_segment(index_hint, x) {
            index_hint
        } else if index_hint + 1 < self.segment_count() && self.is_in_segment(index_hint + 1, x) {
            index_hint + 1
        } else {
            self.find_segment_index(x)
        }
    }

    // Same ownership of shared nodes as find_segment_index, x must be inside the domain.
    fn is_in_segment(&self, index: usize, x: f64) -> bool {
        (index == 0 || self.xs[index] < x) && x <= self.xs[index + 1]
    }
}

/// Builds spline and returns it together with its second derivatives vector.
/// # Example
/// ```
/// use tridiagonal_spline::{build_spline, BoundaryCondition, Node};
/// use assert_approx_eq::assert_approx_eq;
///
/// let nodes: Vec<Node> = [(-1.0, 1.0), (0.0, 2.0), (2.0, 4.0), (3.0, 1.0), (5.0, -3.0)]
///     .into_iter()
///     .map(Node::from)
///     .collect();
/// let (spline, gamma) = build_spline(&nodes, BoundaryCondition::Natural).unwrap();
///
/// assert_eq!(0.0, gamma[0]);
/// assert_eq!(0.0, gamma[4]);
/// assert_approx_eq!(4.0, spline.evaluate(2.0).unwrap(), 1e-9);
/// assert!(spline.evaluate(5.5).is_err());
/// ```
pub fn build_spline(
    nodes: &[Node],
    boundary: BoundaryCondition,
) -> Result<(CubicSpline, DVector<f64>), SplineError> {
    let spline = CubicSpline::new(nodes, boundary)?;
    let gamma = spline.gamma.clone();
    Ok((spline, gamma))
}

fn divided_differences(ys: &[f64], steps: &[f64]) -> Vec<f64> {
    ys.windows(2).zip(steps).map(|(y, h)| (y[1] - y[0]) / h).collect()
}

// Interior gamma values are solved for, both ends stay zero. With two nodes there are no
// interior unknowns and the spline is the straight line through them.
fn natural_gamma(
    ys: &[f64],
    steps: &[f64],
    options: &SolverOptions,
) -> Result<DVector<f64>, SplineError> {
    let n = steps.len();
    let mut gamma = DVector::<f64>::zeros(n + 1);
    if n < 2 {
        return Ok(gamma);
    }

    let interior = natural_system(ys, steps)?.with_unit_diagonal().solve(options)?;
    gamma.rows_mut(1, n - 1).copy_from(&interior);
    Ok(gamma)
}

/// Row `i` couples `gamma_i`, `gamma_{i+1}` and `gamma_{i+2}`, i.e. the equation of node `i + 1`.
fn natural_system(ys: &[f64], steps: &[f64]) -> Result<TridiagonalSystem, SplineError> {
    let h = steps;
    let size = h.len() - 1;
    let slopes = divided_differences(ys, steps);

    // sub[k] belongs to row k + 1 and multiplies gamma_{k+1}: sub[k] = h_{k+1} / 6
    let sub = (1..size).map(|i| h[i] / 6.0).collect();
    let diag = (0..size).map(|i| (h[i] + h[i + 1]) / 3.0).collect();
    let sup = (0..size - 1).map(|i| h[i + 1] / 6.0).collect();
    let rhs = (0..size).map(|i| slopes[i + 1] - slopes[i]).collect();

    TridiagonalSystem::new(sub, diag, sup, rhs)
}

/// Full system for `gamma_0 .. gamma_n`, first and last rows fix the end slopes.
fn clamped_system(
    ys: &[f64],
    steps: &[f64],
    start_slope: f64,
    end_slope: f64,
) -> Result<TridiagonalSystem, SplineError> {
    let h = steps;
    let n = h.len();
    let slopes = divided_differences(ys, steps);

    let sub = h.iter().map(|step| step / 6.0).collect();
    let sup = h.iter().map(|step| step / 6.0).collect();

    let mut diag = Vec::with_capacity(n + 1);
    let mut rhs = Vec::with_capacity(n + 1);

    diag.push(h[0] / 3.0);
    rhs.push(slopes[0] - start_slope);
    for i in 1..n {
        diag.push((h[i - 1] + h[i]) / 3.0);
        rhs.push(slopes[i] - slopes[i - 1]);
    }
    diag.push(h[n - 1] / 3.0);
    rhs.push(end_slope - slopes[n - 1]);

    TridiagonalSystem::new(sub, diag, sup, rhs)
}
