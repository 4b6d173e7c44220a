//! Thomas algorithm for tridiagonal linear systems and cubic interpolating splines
//! (natural and clamped) built on top of it.
//!
//! The spline is stored by its second derivatives at the nodes (`gamma`), which are the
//! unknowns of a tridiagonal system solved once during construction.
//!
//! # Example
//! ```
//! use tridiagonal_spline::{BoundaryCondition, CubicSpline, Node};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let nodes = vec![
//!     Node::new(0.0, 3.0),
//!     Node::new(1.0, 1.0),
//!     Node::new(2.0, 4.0)
//! ];
//! let spline = CubicSpline::new(&nodes, BoundaryCondition::clamped(-3.0, -2.0)).unwrap();
//!
//! assert_approx_eq!(1.0, spline.evaluate(1.0).unwrap(), 1e-9);
//! assert_approx_eq!(-3.0, spline.derivative(0.0).unwrap(), 1e-9);
//! assert!(spline.evaluate(2.5).is_err());
//! ```

mod boundary;
mod error;
mod node;
mod segment;
mod spline;
mod tridiagonal;

pub use boundary::BoundaryCondition;
pub use error::SplineError;
pub use node::Node;
pub use spline::{build_spline, CubicSpline};
pub use tridiagonal::{
    solve_tridiagonal, solve_tridiagonal_with, SolverOptions, TridiagonalSystem,
    DEFAULT_PIVOT_EPSILON,
};
