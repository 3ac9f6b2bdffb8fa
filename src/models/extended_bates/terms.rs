//! Frequency-dependent E, C and D terms of the extended Bates model
//!
//! # E and C
//!
//! The variance and short-rate factors are square-root processes, so their
//! coefficients in the log-characteristic function are affine Riccati
//! solutions with `β = κ` (resp. `κr`):
//! ```text
//! e1 = √(κ² + γ²(u² + iu)),       e2 = (κ - e1)/(κ + e1)
//! E(t) = (κ - e1)/γ² · (1 - e^{-e1 t}) / (1 - e2 e^{-e1 t})
//! ```
//! and the same with `(κr, γr)` for `C(t)`.
//!
//! # D
//!
//! The correlation `ρ_t` between price and variance mean-reverts at speed `κρ`.
//! Its coefficient solves
//! ```text
//! D'(t) = -κρ D + γ d1 (1 - e^{-λ1 t}) (v̄ + (v0 - v̄) e^{-κ(T - t)}),   D(0) = 0
//! ```
//! where `d1(u) = iu(κ - e1)/γ²` is the variance loading and `λ1(u)` is the
//! effective decay rate for which `E(t) ≈ (κ - e1)/γ² (1 - e^{-λ1 t})` is exact
//! at `t = 1`:
//! ```text
//! λ1 = -ln(e^{-e1}(1 - e2) / (1 - e2 e^{-e1})) = e1 + ln((1 - e2 e^{-e1}) / (1 - e2))
//! ```
//! Integrating term by term with `P = e^{-κT}(v0 - v̄)`:
//! ```text
//! D(t) = γ d1 [ P e^{κt}/(κ+κρ) + v̄/κρ - P e^{(κ-λ1)t}/(κ+κρ-λ1)
//!               - v̄ e^{-λ1 t}/(κρ-λ1) + R e^{-κρ t} ]
//! R    = -P/(κ+κρ) - v̄/κρ + v̄/(κρ-λ1) + P/(κ+κρ-λ1)
//! ```

use super::ExtendedBatesParams;
use crate::error::{validation::validate_nonzero_complex, ChfResult};
use crate::math_utils::{exp_integral, I};
use crate::solvers::branch::LogBranch;
use crate::solvers::riccati::AffineRiccati;
use num_complex::Complex64;

/// Closed-form `D(t)` for one frequency.
#[derive(Clone, Copy, Debug)]
pub struct CorrelationTerm {
    /// `d1(u)`
    loading: Complex64,
    /// `λ1(u)`
    lambda1: Complex64,
    kappa: f64,
    kappa_rho: f64,
    /// Coefficients of `e^{κt}`, `1`, `e^{(κ-λ1)t}`, `e^{-λ1 t}` and `e^{-κρ t}`,
    /// each times `γ d1`.
    weights: [Complex64; 5],
}

impl CorrelationTerm {
    pub fn new(
        params: &ExtendedBatesParams,
        loading: Complex64,
        lambda1: Complex64,
    ) -> ChfResult<Self> {
        let v = &params.variance;
        let kappa_rho = params.correlation.kappa_rho;
        let zero = Complex64::new(0.0, 0.0);

        if loading == zero {
            return Ok(CorrelationTerm {
                loading,
                lambda1,
                kappa: v.kappa,
                kappa_rho,
                weights: [zero; 5],
            });
        }

        let rho_gap = kappa_rho - lambda1;
        let full_gap = v.kappa + kappa_rho - lambda1;
        validate_nonzero_complex("kappa_rho - lambda1", rho_gap)?;
        validate_nonzero_complex("kappa + kappa_rho - lambda1", full_gap)?;

        let p = (-v.kappa * params.horizon).exp() * (v.v0 - v.vbar);
        let w_exp_k = Complex64::new(p / (v.kappa + kappa_rho), 0.0);
        let w_const = Complex64::new(v.vbar / kappa_rho, 0.0);
        let w_exp_k_lambda = -p / full_gap;
        let w_exp_lambda = -v.vbar / rho_gap;
        let w_exp_rho = -w_exp_k - w_const - w_exp_k_lambda - w_exp_lambda;

        let scale = v.gamma * loading;
        Ok(CorrelationTerm {
            loading,
            lambda1,
            kappa: v.kappa,
            kappa_rho,
            weights: [
                scale * w_exp_k,
                scale * w_const,
                scale * w_exp_k_lambda,
                scale * w_exp_lambda,
                scale * w_exp_rho,
            ],
        })
    }

    pub fn loading(&self) -> Complex64 {
        self.loading
    }

    pub fn lambda1(&self) -> Complex64 {
        self.lambda1
    }

    fn rates(&self) -> [Complex64; 5] {
        [
            Complex64::new(self.kappa, 0.0),
            Complex64::new(0.0, 0.0),
            self.kappa - self.lambda1,
            -self.lambda1,
            Complex64::new(-self.kappa_rho, 0.0),
        ]
    }

    /// `D(t)`.
    pub fn value(&self, t: f64) -> Complex64 {
        self.weights
            .iter()
            .zip(self.rates().iter())
            .map(|(w, rate)| w * (rate * t).exp())
            .sum()
    }

    /// `∫_0^t D(s) ds`.
    pub fn integral(&self, t: f64) -> Complex64 {
        self.weights
            .iter()
            .zip(self.rates().iter())
            .map(|(w, &rate)| w * exp_integral(rate, t))
            .sum()
    }
}

/// E, C and D for one frequency.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyTerms {
    pub variance: AffineRiccati,
    pub rate: AffineRiccati,
    pub correlation: CorrelationTerm,
}

impl FrequencyTerms {
    pub fn new(
        params: &ExtendedBatesParams,
        u: Complex64,
        branch: &mut LogBranch,
    ) -> ChfResult<Self> {
        let v = &params.variance;
        let r = &params.rate;

        let variance = AffineRiccati::new(Complex64::new(v.kappa, 0.0), v.gamma, u)?;
        let rate = AffineRiccati::new(Complex64::new(r.kappa_r, 0.0), r.gamma_r, u)?;

        let loading = I * u * variance.drift_gap();
        let lambda1 = variance.d() + variance.log_ratio(1.0, branch);
        let correlation = CorrelationTerm::new(params, loading, lambda1)?;

        Ok(FrequencyTerms {
            variance,
            rate,
            correlation,
        })
    }

    /// `E(τ)`, the coefficient of `v0`.
    pub fn e_fun(&self, tau: f64) -> Complex64 {
        self.variance.coefficient(tau)
    }

    /// `C(τ)`, the coefficient of `r0`.
    pub fn c_fun(&self, tau: f64) -> Complex64 {
        self.rate.coefficient(tau)
    }

    /// `D(τ)`, the coefficient of `ρ0`.
    pub fn d_fun(&self, tau: f64) -> Complex64 {
        self.correlation.value(tau)
    }
}
