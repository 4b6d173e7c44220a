use crate::error::SplineError;

/// Node represents an interpolation point `(x, y)` through which the spline passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    x: f64,
    y: f64,
}

impl Node {
    /// Creates node from its coordinates.
    /// # Example
    /// ```
    /// use tridiagonal_spline::Node;
    ///
    /// let node = Node::new(1.0, 2.0);
    /// let from_pair = Node::from((1.0, 2.0));
    ///
    /// assert_eq!(node, from_pair);
    /// assert_eq!(2.0, node.get_y());
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Node { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Node {
    fn from((x, y): (f64, f64)) -> Self {
        Node { x, y }
    }
}

/// Checks that there are at least two nodes, all coordinates are finite and x is strictly
/// increasing.
pub(crate) fn validate_nodes(nodes: &[Node]) -> Result<(), SplineError> {
    if nodes.len() < 2 {
        return Err(SplineError::invalid(format!(
            "spline needs at least 2 nodes, got {}",
            nodes.len()
        )));
    }

    if let Some(index) = nodes.iter().position(|n| !n.x.is_finite() || !n.y.is_finite()) {
        return Err(SplineError::invalid(format!(
            "node {} has non-finite coordinates",
            index
        )));
    }

    for (i, pair) in nodes.windows(2).enumerate() {
        if pair[1].x <= pair[0].x {
            return Err(SplineError::invalid(format!(
                "x must be strictly increasing, but x[{}] = {} and x[{}] = {}",
                i,
                pair[0].x,
                i + 1,
                pair[1].x
            )));
        }
    }
    Ok(())
}

/// Step sizes `h_i = x_{i+1} - x_i`, one per segment.
///
/// The segment cubic works with `h_i^3`, so a step whose cube overflows is rejected.
pub(crate) fn steps(xs: &[f64]) -> Result<Vec<f64>, SplineError> {
    let steps: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    if let Some(index) = steps.iter().position(|h| !(h * h * h).is_finite()) {
        return Err(SplineError::invalid(format!(
            "step between x[{}] = {} and x[{}] = {} is too large",
            index,
            xs[index],
            index + 1,
            xs[index + 1]
        )));
    }
    Ok(steps)
}
