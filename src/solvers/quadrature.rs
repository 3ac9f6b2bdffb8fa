//! Fixed-grid trapezoidal quadrature
//!
//! # Mathematical Description
//!
//! On the uniform grid `z_j = jτ/(N-1)`, `j = 0..N-1`, with step `h = τ/(N-1)`:
//! ```text
//! ∫_0^τ f(z) dz ≈ h [½f(z_0) + f(z_1) + ... + f(z_{N-2}) + ½f(z_{N-1})]
//! ```
//!
//! # Convergence Properties
//!
//! - **Error**: `-(τh²/12) f''(ξ)` for twice-differentiable integrands, so
//!   doubling the grid density cuts the error by a factor of about 4
//! - **Cost**: one integrand evaluation per node; integrands sharing the grid
//!   can reuse the same samples

use crate::error::{validation::*, ChfResult};
use ndarray::Array1;
use num_complex::Complex64;
use tracing::debug;

/// Grid density used by semi-closed-form characteristic functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadratureConfig {
    /// Number of grid nodes on `[0, τ]`, both end points included.
    pub grid_size: usize,
}

impl QuadratureConfig {
    pub fn new(grid_size: usize) -> Self {
        QuadratureConfig { grid_size }
    }

    /// Validate the quadrature configuration
    pub fn validate(&self) -> ChfResult<()> {
        validate_grid_size(self.grid_size)
    }

    /// Same configuration with the grid step halved.
    pub fn refined(&self) -> Self {
        QuadratureConfig {
            grid_size: (2 * self.grid_size).saturating_sub(1),
        }
    }
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        QuadratureConfig { grid_size: 100 }
    }
}

/// Uniform grid on `[0, τ]`.
#[derive(Clone, Debug)]
pub struct TrapezoidalGrid {
    nodes: Array1<f64>,
    step: f64,
}

impl TrapezoidalGrid {
    pub fn new(upper: f64, config: &QuadratureConfig) -> ChfResult<Self> {
        config.validate()?;
        validate_non_negative("tau", upper)?;

        let nodes = Array1::linspace(0.0, upper, config.grid_size);
        let step = upper / (config.grid_size - 1) as f64;
        debug!(grid_size = config.grid_size, upper, step, "built trapezoidal grid");

        Ok(TrapezoidalGrid { nodes, step })
    }

    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Integrate samples taken at [`nodes`](Self::nodes).
    pub fn integrate_samples(&self, samples: &Array1<Complex64>) -> Complex64 {
        debug_assert_eq!(samples.len(), self.nodes.len());
        let n = samples.len();
        let interior: Complex64 = samples.sum();
        self.step * (interior - 0.5 * (samples[0] + samples[n - 1]))
    }

    /// Integrate `f` over the grid.
    pub fn integrate<F>(&self, f: F) -> Complex64
    where
        F: Fn(f64) -> Complex64,
    {
        let samples = self.nodes.mapv(f);
        self.integrate_samples(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_grid_is_one_hundred_points() {
        let config = QuadratureConfig::default();
        assert_eq!(config.grid_size, 100);
        let grid = TrapezoidalGrid::new(2.0, &config).expect("valid grid");
        assert_eq!(grid.len(), 100);
        assert_abs_diff_eq!(grid.nodes()[99], 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(grid.step(), 2.0 / 99.0, epsilon = 1e-15);
    }

    #[test]
    fn test_exact_for_linear_integrands() {
        let grid = TrapezoidalGrid::new(3.0, &QuadratureConfig::new(7)).expect("valid grid");
        let value = grid.integrate(|z| Complex64::new(2.0 * z + 1.0, -z));
        assert_abs_diff_eq!(value.re, 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(value.im, -4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_second_order_convergence() {
        // ∫_0^1 e^{(i-1)z} dz
        let rate = Complex64::new(-1.0, 1.0);
        let exact = ((rate).exp() - 1.0) / rate;
        let f = |z: f64| (rate * z).exp();

        let coarse = QuadratureConfig::new(41);
        let fine = coarse.refined();
        let err_coarse = (TrapezoidalGrid::new(1.0, &coarse).unwrap().integrate(f) - exact).norm();
        let err_fine = (TrapezoidalGrid::new(1.0, &fine).unwrap().integrate(f) - exact).norm();

        let ratio = err_coarse / err_fine;
        assert!(ratio > 3.9 && ratio < 4.1, "error ratio {}", ratio);
    }

    #[test]
    fn test_collapsed_grid_integrates_to_zero() {
        let grid = TrapezoidalGrid::new(0.0, &QuadratureConfig::default()).expect("valid grid");
        assert_eq!(grid.integrate(|_| Complex64::new(1.0, 1.0)).norm(), 0.0);
    }

    #[test]
    fn test_rejects_degenerate_configuration() {
        assert!(TrapezoidalGrid::new(1.0, &QuadratureConfig::new(1)).is_err());
        assert!(TrapezoidalGrid::new(-1.0, &QuadratureConfig::default()).is_err());
    }
}
