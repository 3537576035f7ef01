//! Sampling of the complex parameter domain `w = ξ + iθ`.

use std::f64::consts::FRAC_PI_2;

use num_complex::Complex64;

/// Default sample count along ξ (columns).
pub const XI_STEPS: usize = 25;
/// Default sample count along θ (rows).
pub const THETA_STEPS: usize = 25;

/// Closed interval of the real part ξ.
pub const XI_RANGE: (f64, f64) = (-1.0, 1.0);
/// Closed interval of the imaginary part θ.
pub const THETA_RANGE: (f64, f64) = (0.0, FRAC_PI_2);

/// `count` evenly spaced samples over `[start, stop]`, both ends included.
///
/// Sample `i` is `start + i * step`; the final sample is pinned to `stop` so
/// the interval end is hit exactly regardless of rounding in `step`.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| i as f64 * step + start).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// Row-major grid of complex parameters.
///
/// Rows vary θ and columns vary ξ, so `at(row, col) = ξ[col] + i·θ[row]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGrid {
    xi: Vec<f64>,
    theta: Vec<f64>,
}

impl ParamGrid {
    #[must_use]
    pub fn new(xi_steps: usize, theta_steps: usize) -> Self {
        Self {
            xi: linspace(XI_RANGE.0, XI_RANGE.1, xi_steps),
            theta: linspace(THETA_RANGE.0, THETA_RANGE.1, theta_steps),
        }
    }

    /// The 25×25 grid used for every rendering.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(XI_STEPS, THETA_STEPS)
    }

    #[must_use]
    pub fn xi(&self) -> &[f64] {
        &self.xi
    }

    #[must_use]
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.theta.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.xi.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Complex64 {
        Complex64::new(self.xi[col], self.theta[row])
    }

    /// All parameters in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.theta
            .iter()
            .flat_map(move |&t| self.xi.iter().map(move |&x| Complex64::new(x, t)))
    }
}
