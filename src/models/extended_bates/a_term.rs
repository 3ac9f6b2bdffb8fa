//! The non-affine `A` term of the extended Bates model
//!
//! ```text
//! A(u) = I1 + I2 + I3 + I4
//!
//! I1 = jump compensator + κv̄ ∫_0^τ E(s) ds
//! I2 = (κρμρ + σρρ4 iu a) ∫_0^τ D(z) dz + σρρ4 iu b · I21
//! I3 = ½σρ² ∫_0^τ D(z)² dz
//! I4 = (κrμr + γrρ5 iu m a) I41 + γrρ5 iu a n I42 + γrρ5 iu m b I43 + γrρ5 iu n b I44
//!
//! I21 = ∫_0^τ e^{-c(T-z)} D(z) dz
//! I4k = ∫_0^τ w_k(z) C(z) dz,   w = 1, e^{-o(T-z)}, e^{-c(T-z)}, e^{-(o+c)(T-z)}
//! ```
//! `√v_{T-z} ≈ a + b e^{-c(T-z)}` and `√r_{T-z} ≈ m + n e^{-o(T-z)}` are the
//! fitted square-root paths. `∫E` and `∫D` are closed form; `I21`, `∫D²` and
//! `I41..I44` use the trapezoidal grid.

use super::calibration::SqrtPathFit;
use super::terms::FrequencyTerms;
use super::ExtendedBatesParams;
use crate::math_utils::I;
use crate::solvers::branch::LogBranch;
use crate::solvers::quadrature::TrapezoidalGrid;
use num_complex::Complex64;

/// The integrals of the `A` term that are evaluated by quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureIntegrals {
    /// `∫ e^{-c(T-z)} D(z) dz`
    pub i21: Complex64,
    /// `∫ D(z)² dz`
    pub d_squared: Complex64,
    /// `∫ C(z) dz`
    pub i41: Complex64,
    /// `∫ e^{-o(T-z)} C(z) dz`
    pub i42: Complex64,
    /// `∫ e^{-c(T-z)} C(z) dz`
    pub i43: Complex64,
    /// `∫ e^{-(o+c)(T-z)} C(z) dz`
    pub i44: Complex64,
}

#[derive(Clone, Copy)]
struct NodeSample {
    d: Complex64,
    c: Complex64,
    vol_weight: f64,
    rate_weight: f64,
}

impl QuadratureIntegrals {
    /// All integrals over an empty interval.
    pub fn zero() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        QuadratureIntegrals {
            i21: zero,
            d_squared: zero,
            i41: zero,
            i42: zero,
            i43: zero,
            i44: zero,
        }
    }

    pub fn compute(
        terms: &FrequencyTerms,
        grid: &TrapezoidalGrid,
        horizon: f64,
        vol_path: &SqrtPathFit,
        rate_path: &SqrtPathFit,
    ) -> Self {
        let samples = grid.nodes().mapv(|z| NodeSample {
            d: terms.correlation.value(z),
            c: terms.rate.coefficient(z),
            vol_weight: (-vol_path.decay * (horizon - z)).exp(),
            rate_weight: (-rate_path.decay * (horizon - z)).exp(),
        });
        let integrate =
            |f: fn(&NodeSample) -> Complex64| grid.integrate_samples(&samples.map(f));

        QuadratureIntegrals {
            i21: integrate(|s| s.vol_weight * s.d),
            d_squared: integrate(|s| s.d * s.d),
            i41: integrate(|s| s.c),
            i42: integrate(|s| s.rate_weight * s.c),
            i43: integrate(|s| s.vol_weight * s.c),
            i44: integrate(|s| s.vol_weight * s.rate_weight * s.c),
        }
    }
}

/// `A(u)` split into its four contributions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ATerm {
    pub i1: Complex64,
    pub i2: Complex64,
    pub i3: Complex64,
    pub i4: Complex64,
    pub quadrature: QuadratureIntegrals,
}

impl ATerm {
    /// `A = 0` at zero maturity.
    pub fn zero() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        ATerm {
            i1: zero,
            i2: zero,
            i3: zero,
            i4: zero,
            quadrature: QuadratureIntegrals::zero(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        params: &ExtendedBatesParams,
        u: Complex64,
        terms: &FrequencyTerms,
        grid: &TrapezoidalGrid,
        vol_path: &SqrtPathFit,
        rate_path: &SqrtPathFit,
        branch: &mut LogBranch,
    ) -> Self {
        let tau = params.tau;
        let v = &params.variance;
        let r = &params.rate;
        let corr = &params.correlation;
        let quadrature =
            QuadratureIntegrals::compute(terms, grid, params.horizon, vol_path, rate_path);
        let iu = I * u;

        let (a, b) = (vol_path.level, vol_path.excess);
        let (m, n) = (rate_path.level, rate_path.excess);

        let i1 = params.jumps.log_cf_term(u, tau)
            + v.kappa * v.vbar * terms.variance.integral(tau, branch);

        let corr_vol = corr.sigma_rho * corr.rho4 * iu;
        let i2 = (corr.kappa_rho * corr.mu_rho + corr_vol * a) * terms.correlation.integral(tau)
            + corr_vol * b * quadrature.i21;

        let i3 = 0.5 * corr.sigma_rho * corr.sigma_rho * quadrature.d_squared;

        let rate_vol = r.gamma_r * corr.rho5 * iu;
        let i4 = (r.kappa_r * r.mu_r + rate_vol * m * a) * quadrature.i41
            + rate_vol * a * n * quadrature.i42
            + rate_vol * m * b * quadrature.i43
            + rate_vol * n * b * quadrature.i44;

        ATerm {
            i1,
            i2,
            i3,
            i4,
            quadrature,
        }
    }

    pub fn total(&self) -> Complex64 {
        self.i1 + self.i2 + self.i3 + self.i4
    }
}
