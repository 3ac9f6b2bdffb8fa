// src/models/heston.rs
//! Heston Stochastic Volatility Characteristic Function
//!
//! # Mathematical Framework
//!
//! The Heston model describes asset price evolution with stochastic volatility:
//! ```text
//! dS_t = r S_t dt + √v_t S_t dW_t^(1)
//! dv_t = κ(v̄ - v_t) dt + γ√v_t dW_t^(2),   d⟨W^(1), W^(2)⟩_t = ρ dt
//! ```
//!
//! The log-price is affine in `v`, so
//! ```text
//! φ(u) = exp(A(u) + C(u) v0)
//! D1 = √((κ - γρiu)² + (u² + iu)γ²),   g = (κ - γρiu - D1)/(κ - γρiu + D1)
//! C  = (κ - γρiu - D1)/γ² · (1 - e^{-D1τ}) / (1 - g e^{-D1τ})
//! A  = r iuτ + κv̄/γ² [(κ - γρiu - D1)τ - 2 ln((1 - g e^{-D1τ}) / (1 - g))]
//! ```
//! The `-rτ` discount term is left to the caller.
//!
//! # Branch Handling
//!
//! `D1` is the principal root and `g` uses the minus sign in its numerator,
//! the formulation whose principal logarithm stays continuous in `u`. Sweeps
//! through [`CharacteristicFunction::evaluate_sweep`] additionally unwrap the
//! logarithm if a jump occurs anyway.
//!
//! # Feller Condition
//!
//! `2κv̄ > γ²` keeps the variance strictly positive. A violation does not affect
//! the closed form, so it is only reported at `warn` level.

use super::model::CharacteristicFunction;
use crate::error::ChfResult;
use crate::math_utils::I;
use crate::solvers::branch::LogBranch;
use crate::solvers::riccati::AffineRiccati;
use num_complex::Complex64;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonParams {
    pub r: f64,     // Risk-free rate
    pub tau: f64,   // Time to maturity
    pub kappa: f64, // Mean reversion speed
    pub gamma: f64, // Volatility of variance (vol-of-vol)
    pub vbar: f64,  // Long-term variance
    pub v0: f64,    // Initial variance
    pub rho: f64,   // Correlation between stock and variance
}

impl HestonParams {
    /// `2κv̄ - γ²`; positive when the Feller condition holds.
    pub fn feller_margin(&self) -> f64 {
        2.0 * self.kappa * self.vbar - self.gamma * self.gamma
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HestonCf {
    pub params: HestonParams,
}

impl HestonCf {
    pub fn new(params: HestonParams) -> Self {
        let feller = params.feller_margin();
        if feller <= 0.0 {
            warn!(
                kappa = params.kappa,
                vbar = params.vbar,
                gamma = params.gamma,
                "Feller condition violated (2κv̄ ≤ γ²); variance may hit zero"
            );
        }
        debug!(?params, "built Heston characteristic function");

        HestonCf { params }
    }

    /// `(A(u), C(u))` with `ln φ(u) = A + C v0`.
    fn affine_terms(
        &self,
        u: Complex64,
        branch: &mut LogBranch,
    ) -> ChfResult<(Complex64, Complex64)> {
        let p = &self.params;
        let riccati = AffineRiccati::new(p.kappa - p.gamma * p.rho * I * u, p.gamma, u)?;
        let a = p.r * I * u * p.tau + p.kappa * p.vbar * riccati.integral(p.tau, branch);
        Ok((a, riccati.coefficient(p.tau)))
    }

    /// `A(u)`, the part of `ln φ(u)` independent of `v0`.
    pub fn a_term(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64> {
        Ok(self.affine_terms(u, branch)?.0)
    }

    /// `C(u)`, the coefficient of `v0` in `ln φ(u)`.
    pub fn c_term(&self, u: Complex64) -> ChfResult<Complex64> {
        Ok(self.affine_terms(u, &mut LogBranch::principal())?.1)
    }
}

impl CharacteristicFunction for HestonCf {
    fn name(&self) -> &'static str {
        "Heston"
    }

    fn log_cf_with(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64> {
        let (a, c) = self.affine_terms(u, branch)?;
        Ok(a + c * self.params.v0)
    }
}
