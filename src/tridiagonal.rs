use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use crate::error::SplineError;

/// Pivots with magnitude not above this value are treated as singular unless configured otherwise.
pub const DEFAULT_PIVOT_EPSILON: f64 = 1e-16;

/// Numeric settings of the tridiagonal solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pivot_epsilon: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions { pivot_epsilon: DEFAULT_PIVOT_EPSILON }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold below which a pivot is reported as [SplineError::SingularSystem].
    /// # Example
    /// ```
    /// use tridiagonal_spline::{solve_tridiagonal_with, SolverOptions, SplineError};
    ///
    /// let options = SolverOptions::new().with_pivot_epsilon(1e-3);
    /// let result = solve_tridiagonal_with(&[], &[1e-4], &[], &[1.0], &options);
    ///
    /// assert!(matches!(result, Err(SplineError::SingularSystem { row: 0, .. })));
    /// ```
    pub fn with_pivot_epsilon(mut self, pivot_epsilon: f64) -> Self {
        self.pivot_epsilon = pivot_epsilon;
        self
    }

    pub fn get_pivot_epsilon(&self) -> f64 {
        self.pivot_epsilon
    }

    pub(crate) fn validate(&self) -> Result<(), SplineError> {
        if !self.pivot_epsilon.is_finite() || self.pivot_epsilon < 0.0 {
            return Err(SplineError::invalid(format!(
                "pivot epsilon must be finite and non-negative, got {}",
                self.pivot_epsilon
            )));
        }
        Ok(())
    }
}

/// System `A x = F` with a tridiagonal matrix stored as three diagonals.
///
/// Row `i` reads `sub[i-1] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1] = rhs[i]`,
/// the first and last rows omit the missing term.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// # Errors
    /// [SplineError::InvalidInput] when `diag` is empty, `rhs` differs in length from `diag`
    /// or either off-diagonal is not exactly one element shorter than `diag`.
    pub fn new(
        sub: Vec<f64>,
        diag: Vec<f64>,
        sup: Vec<f64>,
        rhs: Vec<f64>,
    ) -> Result<Self, SplineError> {
        check_lengths(&sub, &diag, &sup, &rhs)?;
        Ok(TridiagonalSystem { sub, diag, sup, rhs })
    }

    pub fn size(&self) -> usize {
        self.diag.len()
    }

    pub fn get_sub_diagonal(&self) -> &[f64] {
        &self.sub
    }

    pub fn get_diagonal(&self) -> &[f64] {
        &self.diag
    }

    pub fn get_super_diagonal(&self) -> &[f64] {
        &self.sup
    }

    pub fn get_rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Solves the system with the Thomas algorithm. No pivoting is done, so the matrix should be
    /// diagonally dominant (or otherwise guarantee non-vanishing pivots).
    pub fn solve(&self, options: &SolverOptions) -> Result<DVector<f64>, SplineError> {
        options.validate()?;
        debug!("solving tridiagonal system of size {}", self.size());
        thomas(&self.sub, &self.diag, &self.sup, &self.rhs, options.pivot_epsilon)
    }

    /// Divides every row by its diagonal entry. The solution is the same, but pivots of the
    /// scaled system are relative to the diagonal, so the pivot epsilon no longer depends on
    /// the magnitude of the coefficients. All diagonal entries must be non-zero.
    pub(crate) fn with_unit_diagonal(&self) -> Self {
        let m = self.size();
        TridiagonalSystem {
            sub: (1..m).map(|i| self.sub[i - 1] / self.diag[i]).collect(),
            diag: vec![1.0; m],
            sup: (0..m - 1).map(|i| self.sup[i] / self.diag[i]).collect(),
            rhs: (0..m).map(|i| self.rhs[i] / self.diag[i]).collect(),
        }
    }

    /// Returns `F - A x`.
    pub fn residual(&self, x: &DVector<f64>) -> Result<DVector<f64>, SplineError> {
        let m = self.size();
        if x.len() != m {
            return Err(SplineError::invalid(format!(
                "solution has {} elements while system has {} rows",
                x.len(),
                m
            )));
        }

        Ok(DVector::from_fn(m, |i, _| {
            let mut lhs = self.diag[i] * x[i];
            if i > 0 {
                lhs += self.sub[i - 1] * x[i - 1];
            }
            if i + 1 < m {
                lhs += self.sup[i] * x[i + 1];
            }
            self.rhs[i] - lhs
        }))
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let m = self.size();
        let mut matrix = DMatrix::<f64>::zeros(m, m);
        for i in 0..m {
            matrix[(i, i)] = self.diag[i];
            if i + 1 < m {
                matrix[(i + 1, i)] = self.sub[i];
                matrix[(i, i + 1)] = self.sup[i];
            }
        }
        matrix
    }
}

/// Solves tridiagonal system with default [SolverOptions].
/// - `a` - sub-diagonal, length `m - 1`,
/// - `b` - main diagonal, length `m`,
/// - `c` - super-diagonal, length `m - 1`,
/// - `f` - right hand side, length `m`.
/// # Example
/// ```
/// use tridiagonal_spline::solve_tridiagonal;
/// use assert_approx_eq::assert_approx_eq;
///
/// let x = solve_tridiagonal(&[-1.0, -1.0], &[2.0, 2.0, 2.0], &[-1.0, -1.0], &[2.0, 2.0, 2.0])
///     .unwrap();
///
/// assert_approx_eq!(3.0, x[0], 1e-12);
/// assert_approx_eq!(4.0, x[1], 1e-12);
/// assert_approx_eq!(3.0, x[2], 1e-12);
/// ```
pub fn solve_tridiagonal(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    f: &[f64],
) -> Result<DVector<f64>, SplineError> {
    solve_tridiagonal_with(a, b, c, f, &SolverOptions::default())
}

pub fn solve_tridiagonal_with(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    f: &[f64],
    options: &SolverOptions,
) -> Result<DVector<f64>, SplineError> {
    options.validate()?;
    check_lengths(a, b, c, f)?;
    thomas(a, b, c, f, options.pivot_epsilon)
}

fn check_lengths(a: &[f64], b: &[f64], c: &[f64], f: &[f64]) -> Result<(), SplineError> {
    let m = b.len();
    if m == 0 {
        return Err(SplineError::invalid("tridiagonal system must have at least one row"));
    }
    if f.len() != m {
        return Err(SplineError::invalid(format!(
            "right hand side has {} elements, main diagonal has {}",
            f.len(),
            m
        )));
    }
    if a.len() != m - 1 || c.len() != m - 1 {
        return Err(SplineError::invalid(format!(
            "off-diagonals must have {} elements, got sub-diagonal {} and super-diagonal {}",
            m - 1,
            a.len(),
            c.len()
        )));
    }
    Ok(())
}

fn check_pivot(row: usize, pivot: f64, epsilon: f64) -> Result<f64, SplineError> {
    if pivot.abs() > epsilon {
        Ok(pivot)
    } else {
        Err(SplineError::SingularSystem { row, pivot, epsilon })
    }
}

// Lengths are checked by the caller.
fn thomas(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    f: &[f64],
    epsilon: f64,
) -> Result<DVector<f64>, SplineError> {
    let m = b.len();

    let mut c_prime = vec![0.0; m - 1];
    let mut d_prime = vec![0.0; m];

    // forward elimination
    let pivot = check_pivot(0, b[0], epsilon)?;
    if m > 1 {
        c_prime[0] = c[0] / pivot;
    }
    d_prime[0] = f[0] / pivot;

    for i in 1..m {
        let denominator = check_pivot(i, b[i] - a[i - 1] * c_prime[i - 1], epsilon)?;
        if i < m - 1 {
            c_prime[i] = c[i] / denominator;
        }
        d_prime[i] = (f[i] - a[i - 1] * d_prime[i - 1]) / denominator;
    }

    // back substitution
    let mut x = DVector::<f64>::zeros(m);
    x[m - 1] = d_prime[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    trace!("thomas solution: {:?}", x.as_slice());
    Ok(x)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn three_by_three() {
        let eps = 1e-12;
        let x = solve_tridiagonal(&[-1.0, -1.0], &[2.0, 2.0, 2.0], &[-1.0, -1.0], &[2.0, 2.0, 2.0])
            .unwrap();

        assert_eq!(3, x.len());
        assert_approx_eq!(x[0], 3.0, eps);
        assert_approx_eq!(x[1], 4.0, eps);
        assert_approx_eq!(x[2], 3.0, eps);
    }

    #[test]
    fn two_by_two() {
        let eps = 1e-12;
        let x = solve_tridiagonal(&[-1.0], &[2.0, 2.0], &[-1.0], &[2.0, 2.0]).unwrap();

        assert_eq!(2, x.len());
        assert_approx_eq!(x[0], 2.0, eps);
        assert_approx_eq!(x[1], 2.0, eps);
    }

    #[test]
    fn single_row() {
        let x = solve_tridiagonal(&[], &[4.0], &[], &[2.0]).unwrap();

        assert_eq!(1, x.len());
        assert_eq!(0.5, x[0]);
    }

    #[test]
    fn non_symmetric_system() {
        let eps = 1e-12;
        // [4 1 0 0]       [ 6]
        // [2 5 1 0] * x = [15]
        // [0 3 6 2]       [32]
        // [0 0 1 3]       [15]
        // x = [1, 2, 3, 4]
        let system = TridiagonalSystem::new(
            vec![2.0, 3.0, 1.0],
            vec![4.0, 5.0, 6.0, 3.0],
            vec![1.0, 1.0, 2.0],
            vec![6.0, 15.0, 32.0, 15.0],
        )
        .unwrap();
        let x = system.solve(&SolverOptions::default()).unwrap();

        for (i, expected) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            assert_approx_eq!(x[i], *expected, eps);
        }
        assert!(system.residual(&x).unwrap().amax() < eps);
    }

    #[test]
    fn zero_leading_pivot() {
        let result = solve_tridiagonal(&[1.0], &[0.0, 1.0], &[1.0], &[1.0, 1.0]);

        assert!(matches!(result, Err(SplineError::SingularSystem { row: 0, .. })));
    }

    #[test]
    fn zero_pivot_during_elimination() {
        // second pivot: 1 - 1 * 1 = 0
        let result = solve_tridiagonal(&[1.0], &[1.0, 1.0], &[1.0], &[1.0, 2.0]);

        match result {
            Err(SplineError::SingularSystem { row, pivot, .. }) => {
                assert_eq!(1, row);
                assert_eq!(0.0, pivot);
            }
            other => panic!("expected singular system, got {:?}", other),
        }
    }

    #[test]
    fn nan_pivot_is_singular() {
        let result = solve_tridiagonal(&[], &[f64::NAN], &[], &[1.0]);

        assert!(matches!(result, Err(SplineError::SingularSystem { row: 0, .. })));
    }

    #[test]
    fn configurable_pivot_epsilon() {
        let b = [1e-10, 1.0];
        let a = [0.0];
        let c = [0.0];
        let f = [1.0, 1.0];

        assert!(solve_tridiagonal(&a, &b, &c, &f).is_ok());

        let strict = SolverOptions::new().with_pivot_epsilon(1e-8);
        let result = solve_tridiagonal_with(&a, &b, &c, &f, &strict);
        assert!(matches!(result, Err(SplineError::SingularSystem { row: 0, .. })));
    }

    #[test]
    fn invalid_pivot_epsilon() {
        let options = SolverOptions::new().with_pivot_epsilon(-1.0);
        let result = solve_tridiagonal_with(&[], &[1.0], &[], &[1.0], &options);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));

        let options = SolverOptions::new().with_pivot_epsilon(f64::NAN);
        let result = solve_tridiagonal_with(&[], &[1.0], &[], &[1.0], &options);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn empty_system() {
        let result = solve_tridiagonal(&[], &[], &[], &[]);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn mismatched_lengths() {
        let result = solve_tridiagonal(&[1.0], &[2.0, 2.0], &[1.0], &[1.0]);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));

        let result = solve_tridiagonal(&[1.0, 1.0], &[2.0, 2.0], &[1.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));

        let result = solve_tridiagonal(&[1.0], &[2.0, 2.0], &[], &[1.0, 1.0]);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));

        let result = TridiagonalSystem::new(vec![], vec![1.0, 1.0], vec![], vec![1.0, 1.0]);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn residual_length_mismatch() {
        let system =
            TridiagonalSystem::new(vec![-1.0], vec![2.0, 2.0], vec![-1.0], vec![2.0, 2.0]).unwrap();
        let result = system.residual(&DVector::from_vec(vec![1.0]));
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn unit_diagonal_keeps_solution() {
        let eps = 1e-12;
        let system = TridiagonalSystem::new(
            vec![2.0, 3.0, 1.0],
            vec![4.0, 5.0, 6.0, 3.0],
            vec![1.0, 1.0, 2.0],
            vec![6.0, 15.0, 32.0, 15.0],
        )
        .unwrap();
        let scaled = system.with_unit_diagonal();

        assert_eq!(&[1.0, 1.0, 1.0, 1.0], scaled.get_diagonal());
        assert_eq!(&[0.4, 0.5, 1.0 / 3.0], scaled.get_sub_diagonal());
        assert_eq!(&[0.25, 0.2, 2.0 / 6.0], scaled.get_super_diagonal());

        let x = scaled.solve(&SolverOptions::default()).unwrap();
        for (i, expected) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            assert_approx_eq!(x[i], *expected, eps);
        }
    }

    #[test]
    fn unit_diagonal_makes_pivots_scale_free() {
        // same system as three_by_three, scaled down far below the default epsilon
        let scale = 1e-20;
        let system = TridiagonalSystem::new(
            vec![-scale, -scale],
            vec![2.0 * scale, 2.0 * scale, 2.0 * scale],
            vec![-scale, -scale],
            vec![2.0 * scale, 2.0 * scale, 2.0 * scale],
        )
        .unwrap();

        let result = system.solve(&SolverOptions::default());
        assert!(matches!(result, Err(SplineError::SingularSystem { row: 0, .. })));

        let x = system.with_unit_diagonal().solve(&SolverOptions::default()).unwrap();
        assert_approx_eq!(x[0], 3.0, 1e-12);
        assert_approx_eq!(x[1], 4.0, 1e-12);
        assert_approx_eq!(x[2], 3.0, 1e-12);
    }

    #[test]
    fn to_dense_layout() {
        let system = TridiagonalSystem::new(
            vec![1.0, 2.0],
            vec![3.0, 4.0, 5.0],
            vec![6.0, 7.0],
            vec![0.0, 0.0, 0.0],
        )
        .unwrap();
        let expected = DMatrix::from_row_slice(3, 3, &[
            3.0, 6.0, 0.0,
            1.0, 4.0, 7.0,
            0.0, 2.0, 5.0,
        ]);

        assert_eq!(expected, system.to_dense());
    }

    #[test]
    fn random_diagonally_dominant_systems() {
        let mut rng = StdRng::seed_from_u64(2024);

        for m in 1..40 {
            let sub: Vec<f64> = (0..m - 1).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let sup: Vec<f64> = (0..m - 1).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let diag: Vec<f64> = (0..m)
                .map(|_| {
                    let magnitude = rng.gen_range(2.5..10.0);
                    if rng.gen_bool(0.5) { magnitude } else { -magnitude }
                })
                .collect();
            let rhs: Vec<f64> = (0..m).map(|_| rng.gen_range(-100.0..100.0)).collect();

            let system = TridiagonalSystem::new(sub, diag, sup, rhs.clone()).unwrap();
            let x = system.solve(&SolverOptions::default()).unwrap();

            let residual = system.residual(&x).unwrap();
            for i in 0..m {
                assert!(
                    residual[i].abs() <= 1e-9 * (1.0 + rhs[i].abs()),
                    "row {} of size {} system has residual {}",
                    i,
                    m,
                    residual[i]
                );
            }

            let dense = system.to_dense().lu().solve(&DVector::from_vec(rhs)).unwrap();
            for i in 0..m {
                assert_approx_eq!(x[i], dense[i], 1e-9);
            }
        }
    }
}
