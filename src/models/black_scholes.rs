// src/models/black_scholes.rs
//! Black-Scholes characteristic function
//!
//! Under `dS_t = r S_t dt + σ S_t dW_t` the log-return over `τ` is normal with
//! mean `(r - σ²/2)τ` and variance `σ²τ`, so
//! ```text
//! φ(u) = exp((r - σ²/2) iuτ - ½σ²u²τ)
//! ```
//! No discount factor is included.

use super::model::CharacteristicFunction;
use crate::error::ChfResult;
use crate::math_utils::I;
use crate::solvers::branch::LogBranch;
use num_complex::Complex64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholesCf {
    pub r: f64,
    pub sigma: f64,
    pub tau: f64,
}

impl BlackScholesCf {
    pub fn new(r: f64, sigma: f64, tau: f64) -> Self {
        BlackScholesCf { r, sigma, tau }
    }

    /// Mean of the log-return, `(r - σ²/2)τ`.
    pub fn mean(&self) -> f64 {
        (self.r - 0.5 * self.sigma * self.sigma) * self.tau
    }

    /// Variance of the log-return, `σ²τ`.
    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma * self.tau
    }
}

impl CharacteristicFunction for BlackScholesCf {
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn log_cf_with(&self, u: Complex64, _branch: &mut LogBranch) -> ChfResult<Complex64> {
        Ok(I * u * self.mean() - 0.5 * self.variance() * u * u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_unit_at_origin() {
        let cf = BlackScholesCf::new(0.05, 0.2, 1.0);
        let value = cf.evaluate_real(0.0).expect("finite");
        assert_eq!(value, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_modulus_is_gaussian() {
        let cf = BlackScholesCf::new(0.03, 0.25, 2.0);
        let u = 1.7;
        let value = cf.evaluate_real(u).expect("finite");
        assert_abs_diff_eq!(value.norm(), (-0.5 * 0.0625 * 2.0 * u * u).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(value.arg(), cf.mean() * u, epsilon = 1e-15);
    }

    #[test]
    fn test_imaginary_shift_gives_forward() {
        // φ(-i) = E[S_T/S_0] = e^{rτ}
        let cf = BlackScholesCf::new(0.04, 0.3, 1.5);
        let value = cf.evaluate(Complex64::new(0.0, -1.0)).expect("finite");
        assert_abs_diff_eq!(value.re, (0.04f64 * 1.5).exp(), epsilon = 1e-14);
        assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-14);
    }
}
