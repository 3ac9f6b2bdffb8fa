//! Closed-form solution of the affine variance Riccati equation
//!
//! # Mathematical Framework
//!
//! For a square-root factor with mean reversion `κ` and volatility `σ`, the
//! coefficient of the factor's initial level in the log-characteristic function
//! solves
//! ```text
//! C'(t) = ½σ²C² - βC - ½(u² + iu),   C(0) = 0
//! ```
//! where `β = κ` for an uncorrelated factor and `β = κ - σρiu` for the Heston
//! variance. With
//! ```text
//! d = √(β² + σ²(u² + iu)),   g = (β - d)/(β + d)
//! ```
//! the solution and its time integral are
//! ```text
//! C(t)       = (β - d)/σ² · (1 - e^{-dt}) / (1 - g e^{-dt})
//! ∫_0^t C(s) ds = [(β - d)t - 2 ln((1 - g e^{-dt}) / (1 - g))] / σ²
//! ```
//!
//! # Numerical Treatment
//!
//! - `d` is the principal root (`Re d ≥ 0`), so `e^{-dt}` decays and
//!   `|g e^{-dt}| < 1`; this is the formulation whose principal logarithm has
//!   no branch jumps for ordinary parameters.
//! - `β - d` is computed as `-σ²(u² + iu)/(β + d)`, so `(β - d)/σ²` and `g/σ²`
//!   carry no `1/σ²` cancellation and `σ = 0` is the exact deterministic limit.
//! - The logarithm is evaluated as `ln(1 + w)`, `w = g(1 - e^{-dt})/(1 - g)`,
//!   divided by `σ²` through `w/σ² · ln(1 + w)/w`.

use crate::error::{validation::validate_nonzero_complex, ChfResult};
use crate::math_utils::{ln_1p, ln_1p_ratio, I};
use crate::solvers::branch::LogBranch;
use num_complex::Complex64;

#[derive(Clone, Copy, Debug)]
pub struct AffineRiccati {
    sigma: f64,
    d: Complex64,
    /// `(β - d)/σ²`
    drift_gap: Complex64,
    /// `g/σ²`
    g_scaled: Complex64,
}

impl AffineRiccati {
    /// Roots for frequency `u`, effective drift `beta` and factor volatility `sigma`.
    ///
    /// # Errors
    /// `SingularConfiguration` when `β + d = 0`, which happens at `u = 0` for a
    /// non-positive mean-reversion speed.
    pub fn new(beta: Complex64, sigma: f64, u: Complex64) -> ChfResult<Self> {
        let q = u * u + I * u;
        let d = (beta * beta + sigma * sigma * q).sqrt();
        let beta_plus_d = beta + d;
        validate_nonzero_complex("beta + d", beta_plus_d)?;

        let drift_gap = -q / beta_plus_d;
        let g_scaled = drift_gap / beta_plus_d;

        Ok(AffineRiccati {
            sigma,
            d,
            drift_gap,
            g_scaled,
        })
    }

    /// Principal square root `d(u)`.
    pub fn d(&self) -> Complex64 {
        self.d
    }

    /// `g(u) = (β - d)/(β + d)`.
    pub fn g(&self) -> Complex64 {
        self.g_scaled * self.sigma * self.sigma
    }

    /// `(β - d)/σ²`, the long-maturity limit of [`coefficient`](Self::coefficient).
    pub fn drift_gap(&self) -> Complex64 {
        self.drift_gap
    }

    /// `C(t)`.
    pub fn coefficient(&self, t: f64) -> Complex64 {
        let decay = (-self.d * t).exp();
        self.drift_gap * (1.0 - decay) / (1.0 - self.g() * decay)
    }

    /// `ln((1 - g e^{-dt})/(1 - g))` with the branch chosen by `branch`.
    pub fn log_ratio(&self, t: f64, branch: &mut LogBranch) -> Complex64 {
        let w = self.log_argument(t);
        let principal = ln_1p(w);
        principal + I * branch.winding(principal.im)
    }

    /// `∫_0^t C(s) ds`.
    pub fn integral(&self, t: f64, branch: &mut LogBranch) -> Complex64 {
        let decay = (-self.d * t).exp();
        let g = self.g();
        // w/σ²
        let w_scaled = self.g_scaled * (1.0 - decay) / (1.0 - g);
        let w = w_scaled * self.sigma * self.sigma;

        let mut log_over_sigma2 = w_scaled * ln_1p_ratio(w);
        if branch.is_tracking() {
            let offset = branch.winding(ln_1p(w).im);
            if offset != 0.0 {
                log_over_sigma2 += I * offset / (self.sigma * self.sigma);
            }
        }

        self.drift_gap * t - 2.0 * log_over_sigma2
    }

    fn log_argument(&self, t: f64) -> Complex64 {
        let decay = (-self.d * t).exp();
        let g = self.g();
        g * (1.0 - decay) / (1.0 - g)
    }
}
