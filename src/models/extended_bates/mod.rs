// src/models/extended_bates/mod.rs
//! Bates model with stochastic interest rate and stochastic correlation
//!
//! # Mathematical Framework
//!
//! ```text
//! dS_t = r_t S_t dt + √v_t S_t dW_t^(1) + jumps
//! dv_t = κ(v̄ - v_t) dt + γ√v_t dW_t^(2)
//! dr_t = κr(μr - r_t) dt + γr√r_t dW_t^(3)
//! dρ_t = κρ(μρ - ρ_t) dt + σρ dW_t^(4)
//! ```
//! `ρ_t` is the price/variance correlation; `ρ4` and `ρ5` couple the
//! correlation and rate shocks to the variance. The log-characteristic function
//! is affine in the three factors up to the `√v_t` and `√r_t` terms, which are
//! replaced by the fitted paths of [`calibration`]:
//! ```text
//! φ(u) = exp(A(u) + C(τ) r0 + D(τ) ρ0 + E(τ) v0)
//! ```
//! `E`, `C` and `D` live in [`terms`], `A` in [`a_term`].
//!
//! # Numerical Scheme
//!
//! `∫E` and `∫D` are closed form. The remaining integrals of `A` use a
//! trapezoidal grid of [`QuadratureConfig::grid_size`] points on `[0, τ]`, so the
//! value carries an `O(h²)` quadrature error.

pub mod a_term;
pub mod calibration;
pub mod terms;

use self::a_term::{ATerm, QuadratureIntegrals};
use self::calibration::SqrtPathFit;
use self::terms::FrequencyTerms;
use super::bates::JumpParams;
use super::model::CharacteristicFunction;
use crate::error::{validation::*, ChfResult};
use crate::solvers::branch::LogBranch;
use crate::solvers::quadrature::{QuadratureConfig, TrapezoidalGrid};
use num_complex::Complex64;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VarianceParams {
    pub kappa: f64, // Mean reversion speed
    pub gamma: f64, // Volatility of variance
    pub vbar: f64,  // Long-term variance
    pub v0: f64,    // Initial variance
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateParams {
    pub kappa_r: f64, // Mean reversion speed
    pub gamma_r: f64, // Volatility of the short rate
    pub mu_r: f64,    // Long-term rate
    pub r0: f64,      // Initial rate
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationParams {
    pub kappa_rho: f64, // Mean reversion speed of ρ_t
    pub mu_rho: f64,    // Long-term correlation
    pub sigma_rho: f64, // Volatility of ρ_t
    pub rho0: f64,      // Initial correlation
    pub rho4: f64,      // Correlation of ρ_t and variance shocks
    pub rho5: f64,      // Correlation of rate and variance shocks
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtendedBatesParams {
    /// Time to maturity `τ`.
    pub tau: f64,
    /// Calendar horizon `T` of the expected-variance and fitted paths.
    pub horizon: f64,
    pub variance: VarianceParams,
    pub rate: RateParams,
    pub correlation: CorrelationParams,
    pub jumps: JumpParams,
}

impl ExtendedBatesParams {
    /// Validate the parameters that every frequency depends on
    pub fn validate(&self) -> ChfResult<()> {
        validate_non_negative("tau", self.tau)?;
        validate_finite("horizon", self.horizon)?;
        validate_positive("kappa", self.variance.kappa)?;
        validate_positive("kappa_r", self.rate.kappa_r)?;
        validate_nonzero("kappa_rho", self.correlation.kappa_rho)?;
        validate_nonzero("kappa + kappa_rho", self.variance.kappa + self.correlation.kappa_rho)?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct ExtendedBatesCf {
    pub params: ExtendedBatesParams,
    pub config: QuadratureConfig,
    grid: TrapezoidalGrid,
    vol_path: SqrtPathFit,
    rate_path: SqrtPathFit,
}

impl ExtendedBatesCf {
    /// Validate the parameters, fit both square-root paths and build the grid.
    pub fn new(params: ExtendedBatesParams, config: QuadratureConfig) -> ChfResult<Self> {
        config.validate()?;
        params.validate()?;

        let v = &params.variance;
        let r = &params.rate;
        let vol_path = SqrtPathFit::fit("variance", v.kappa, v.gamma, v.vbar, v.v0)?;
        let rate_path = SqrtPathFit::fit("rate", r.kappa_r, r.gamma_r, r.mu_r, r.r0)?;
        let grid = TrapezoidalGrid::new(params.tau, &config)?;

        debug!(
            tau = params.tau,
            horizon = params.horizon,
            grid_size = config.grid_size,
            "built extended Bates characteristic function"
        );

        Ok(ExtendedBatesCf {
            params,
            config,
            grid,
            vol_path,
            rate_path,
        })
    }

    /// Same model with default quadrature.
    pub fn with_default_grid(params: ExtendedBatesParams) -> ChfResult<Self> {
        Self::new(params, QuadratureConfig::default())
    }

    /// Fitted `(a, b, c)` of `√v`.
    pub fn vol_path(&self) -> &SqrtPathFit {
        &self.vol_path
    }

    /// Fitted `(m, n, o)` of `√r`.
    pub fn rate_path(&self) -> &SqrtPathFit {
        &self.rate_path
    }

    /// E, C and D at frequency `u`.
    pub fn terms(&self, u: Complex64) -> ChfResult<FrequencyTerms> {
        FrequencyTerms::new(&self.params, u, &mut LogBranch::principal())
    }

    /// The quadrature-evaluated integrals of `A(u)`; all zero when `τ = 0`.
    pub fn quadrature_integrals(&self, u: Complex64) -> ChfResult<QuadratureIntegrals> {
        if self.params.tau == 0.0 {
            return Ok(QuadratureIntegrals::zero());
        }
        let terms = self.terms(u)?;
        Ok(QuadratureIntegrals::compute(
            &terms,
            &self.grid,
            self.params.horizon,
            &self.vol_path,
            &self.rate_path,
        ))
    }

    /// `A(u)` split into `I1..I4`; all zero when `τ = 0`.
    pub fn a_term_breakdown(&self, u: Complex64) -> ChfResult<ATerm> {
        if self.params.tau == 0.0 {
            return Ok(ATerm::zero());
        }
        let mut branch = LogBranch::principal();
        let terms = FrequencyTerms::new(&self.params, u, &mut branch)?;
        Ok(self.a_term_with(u, &terms, &mut branch))
    }

    fn a_term_with(&self, u: Complex64, terms: &FrequencyTerms, branch: &mut LogBranch) -> ATerm {
        ATerm::compute(
            &self.params,
            u,
            terms,
            &self.grid,
            &self.vol_path,
            &self.rate_path,
            branch,
        )
    }
}

impl CharacteristicFunction for ExtendedBatesCf {
    fn name(&self) -> &'static str {
        "Extended Bates"
    }

    fn log_cf_with(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64> {
        let p = &self.params;
        if p.tau == 0.0 {
            trace!(%u, "zero maturity, φ = 1");
            return Ok(Complex64::new(0.0, 0.0));
        }

        let terms = FrequencyTerms::new(p, u, branch)?;
        let a = self.a_term_with(u, &terms, branch);
        trace!(%u, i1 = %a.i1, i2 = %a.i2, i3 = %a.i3, i4 = %a.i4, "evaluated A term");

        Ok(a.total()
            + terms.c_fun(p.tau) * p.rate.r0
            + terms.d_fun(p.tau) * p.correlation.rho0
            + terms.e_fun(p.tau) * p.variance.v0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ChfError;
    use approx::assert_abs_diff_eq;

    pub(crate) fn sample_params() -> ExtendedBatesParams {
        ExtendedBatesParams {
            tau: 1.0,
            horizon: 1.0,
            variance: VarianceParams {
                kappa: 1.2,
                gamma: 0.4,
                vbar: 0.05,
                v0: 0.06,
            },
            rate: RateParams {
                kappa_r: 0.8,
                gamma_r: 0.05,
                mu_r: 0.03,
                r0: 0.02,
            },
            correlation: CorrelationParams {
                kappa_rho: 2.0,
                mu_rho: -0.5,
                sigma_rho: 0.2,
                rho0: -0.6,
                rho4: 0.3,
                rho5: 0.2,
            },
            jumps: JumpParams {
                intensity: 0.3,
                mu_j: -0.05,
                sigma_j: 0.1,
            },
        }
    }

    #[test]
    fn test_fitted_constants() {
        let cf = ExtendedBatesCf::with_default_grid(sample_params()).expect("valid model");
        assert_abs_diff_eq!(cf.vol_path().level, 0.18257418583505536, epsilon = 1e-12);
        assert_abs_diff_eq!(cf.vol_path().excess, 0.06237478844326244, epsilon = 1e-12);
        assert_abs_diff_eq!(cf.vol_path().decay, 1.7533163629117265, epsilon = 1e-9);
        assert_abs_diff_eq!(cf.rate_path().level, 0.17207374872420256, epsilon = 1e-12);
        assert_abs_diff_eq!(cf.rate_path().excess, -0.030652392486893054, epsilon = 1e-12);
        assert_abs_diff_eq!(cf.rate_path().decay, 0.8365377133997216, epsilon = 1e-9);
    }

    #[test]
    fn test_unit_at_origin() {
        let cf = ExtendedBatesCf::with_default_grid(sample_params()).expect("valid model");
        let value = cf.evaluate_real(0.0).expect("finite");
        assert_abs_diff_eq!(value.re, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_reference_value() {
        let cf = ExtendedBatesCf::with_default_grid(sample_params()).expect("valid model");
        let value = cf.evaluate_real(1.3).expect("finite");
        assert_abs_diff_eq!(value.re, 0.9283530083249311, epsilon = 1e-9);
        assert_abs_diff_eq!(value.im, -0.04462992800932166, epsilon = 1e-9);
    }

    #[test]
    fn test_breakdown_recomposes() {
        let cf = ExtendedBatesCf::with_default_grid(sample_params()).expect("valid model");
        let u = Complex64::new(2.5, 0.0);
        let p = &cf.params;
        let a = cf.a_term_breakdown(u).unwrap();
        let terms = cf.terms(u).unwrap();
        let recomposed = a.total()
            + terms.c_fun(p.tau) * p.rate.r0
            + terms.d_fun(p.tau) * p.correlation.rho0
            + terms.e_fun(p.tau) * p.variance.v0;
        assert_abs_diff_eq!((recomposed - cf.log_cf(u).unwrap()).norm(), 0.0, epsilon = 1e-14);
        assert_eq!(a.quadrature, cf.quadrature_integrals(u).unwrap());
    }

    #[test]
    fn test_zero_maturity_is_one() {
        let params = ExtendedBatesParams {
            tau: 0.0,
            ..sample_params()
        };
        let cf = ExtendedBatesCf::with_default_grid(params).expect("valid model");
        assert_eq!(cf.evaluate_real(7.0).unwrap(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_rejects_singular_correlation_speed() {
        let mut params = sample_params();
        params.correlation.kappa_rho = 0.0;
        let err = ExtendedBatesCf::with_default_grid(params).unwrap_err();
        assert!(matches!(err, ChfError::SingularConfiguration { .. }));

        params.correlation.kappa_rho = -params.variance.kappa;
        let err = ExtendedBatesCf::with_default_grid(params).unwrap_err();
        assert!(matches!(err, ChfError::SingularConfiguration { .. }));
    }

    #[test]
    fn test_rejects_non_positive_mean_reversion() {
        let mut params = sample_params();
        params.variance.kappa = 0.0;
        let err = ExtendedBatesCf::with_default_grid(params).unwrap_err();
        assert!(matches!(err, ChfError::InvalidParameterDomain { .. }));
    }

    #[test]
    fn test_rejects_rate_level_below_convexity_bound() {
        let mut params = sample_params();
        params.rate.mu_r = 1e-5; // < γr²/(8κr) ≈ 3.9e-4
        let err = ExtendedBatesCf::with_default_grid(params).unwrap_err();
        assert!(matches!(err, ChfError::InvalidParameterDomain { .. }));
    }
}
