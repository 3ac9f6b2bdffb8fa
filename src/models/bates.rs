// src/models/bates.rs
//! Bates model: Heston stochastic volatility plus log-normal jumps
//!
//! Jumps arrive with intensity `ξP` and multiply the price by `e^J`,
//! `J ~ N(μJ, σJ²)`. The compensated compound-Poisson part adds to the Heston
//! exponent:
//! ```text
//! A(u) = A_Hes(u) - iuτξP(e^{μJ + σJ²/2} - 1) + τξP(e^{iuμJ - σJ²u²/2} - 1)
//! φ(u) = exp(A(u) + C_Hes(u) v0)
//! ```
//! Both `e^x - 1` factors go through `expm1` so that the jump term keeps full
//! relative precision near `u = 0`.

use super::heston::{HestonCf, HestonParams};
use super::model::CharacteristicFunction;
use crate::error::ChfResult;
use crate::math_utils::{exp_m1, I};
use crate::solvers::branch::LogBranch;
use num_complex::Complex64;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpParams {
    pub intensity: f64, // Jump intensity ξP
    pub mu_j: f64,      // Mean of log-jump size
    pub sigma_j: f64,   // Std dev of log-jump size
}

impl JumpParams {
    /// No jumps.
    pub fn none() -> Self {
        JumpParams {
            intensity: 0.0,
            mu_j: 0.0,
            sigma_j: 0.0,
        }
    }

    /// Expected relative jump size `E[e^J] - 1`.
    pub fn mean_relative_jump(&self) -> f64 {
        (self.mu_j + 0.5 * self.sigma_j * self.sigma_j).exp_m1()
    }

    /// Compensated jump contribution to `ln φ(u)` over `tau`.
    pub fn log_cf_term(&self, u: Complex64, tau: f64) -> Complex64 {
        let jump_cf_m1 = exp_m1(I * u * self.mu_j - 0.5 * self.sigma_j * self.sigma_j * u * u);
        -I * u * tau * self.intensity * self.mean_relative_jump()
            + tau * self.intensity * jump_cf_m1
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BatesCf {
    pub heston: HestonCf,
    pub jumps: JumpParams,
}

impl BatesCf {
    pub fn new(params: HestonParams, jumps: JumpParams) -> Self {
        debug!(?jumps, "built Bates characteristic function");
        BatesCf {
            heston: HestonCf::new(params),
            jumps,
        }
    }

    /// `A(u)`: the Heston `A` term plus the jump compensator.
    pub fn a_term(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64> {
        Ok(self.heston.a_term(u, branch)? + self.jumps.log_cf_term(u, self.heston.params.tau))
    }
}

impl CharacteristicFunction for BatesCf {
    fn name(&self) -> &'static str {
        "Bates"
    }

    fn log_cf_with(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64> {
        let heston = self.heston.log_cf_with(u, branch)?;
        Ok(heston + self.jumps.log_cf_term(u, self.heston.params.tau))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params() -> HestonParams {
        HestonParams {
            r: 0.02,
            tau: 1.0,
            kappa: 1.5,
            gamma: 0.3,
            vbar: 0.04,
            v0: 0.04,
            rho: -0.7,
        }
    }

    fn jumps() -> JumpParams {
        JumpParams {
            intensity: 0.5,
            mu_j: -0.1,
            sigma_j: 0.15,
        }
    }

    #[test]
    fn test_unit_at_origin() {
        let cf = BatesCf::new(params(), jumps());
        let value = cf.evaluate_real(0.0).expect("finite");
        assert_abs_diff_eq!(value.re, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_martingale_condition() {
        // The compensator keeps E[S_T/S_0] = e^{rτ}
        let cf = BatesCf::new(params(), jumps());
        let value = cf.evaluate(Complex64::new(0.0, -1.0)).expect("finite");
        assert_abs_diff_eq!(value.re, (0.02f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_jump_term_is_accurate_for_small_frequency() {
        // First order in u: iu·τξP(μJ - E[e^J] + 1)
        let u = Complex64::new(1e-9, 0.0);
        let j = jumps();
        let term = j.log_cf_term(u, 2.0);
        let slope = 2.0 * j.intensity * (j.mu_j - j.mean_relative_jump());
        assert_abs_diff_eq!(term.im / 1e-9, slope, epsilon = 1e-6);
    }

    #[test]
    fn test_a_term_adds_jump_compensator() {
        let cf = BatesCf::new(params(), jumps());
        let u = Complex64::new(2.0, 0.0);
        let a = cf.a_term(u, &mut LogBranch::principal()).unwrap();
        let c = cf.heston.c_term(u).unwrap();
        let log_cf = cf.log_cf(u).unwrap();
        assert_abs_diff_eq!((a + c * 0.04 - log_cf).norm(), 0.0, epsilon = 1e-14);
    }
}
