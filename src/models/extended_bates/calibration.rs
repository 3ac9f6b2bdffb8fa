//! Expected square-root paths of the CIR factors
//!
//! # Mathematical Framework
//!
//! For `dx_t = κ(θ - x_t)dt + γ√x_t dW_t`, `x_t/c(t)` is noncentral
//! chi-square with
//! ```text
//! c(t) = γ²(1 - e^{-κt}) / (4κ)
//! δ    = 4κθ / γ²                              (degrees of freedom)
//! λ(t) = 4κ x0 e^{-κt} / (γ²(1 - e^{-κt}))     (noncentrality)
//! ```
//! and its square root has the approximate mean
//! ```text
//! L(t) = √(c(t)(λ(t) - 1) + c(t)δ + c(t)δ / (2(δ + λ(t))))
//! ```
//! The non-affine `√v_t` and `√r_t` terms of the extended Bates model are
//! replaced by the fit
//! ```text
//! √x_t ≈ a + b e^{-ct},   a = √(θ - γ²/(8κ)),   b = √x0 - a,   c = -ln((L(1) - a)/b)
//! ```
//! which matches `L` at `t = 0`, at `t = 1` and as `t → ∞`.

use crate::error::{validation::*, ChfError, ChfResult};
use tracing::debug;

/// Time at which the fitted path is pinned to `L(t)`.
pub const FIT_TIME: f64 = 1.0;

/// `L(t)`, the approximate `E[√x_t]` of a CIR factor.
pub fn expected_sqrt_cir(
    kappa: f64,
    gamma: f64,
    level: f64,
    initial: f64,
    t: f64,
) -> ChfResult<f64> {
    validate_positive("kappa", kappa)?;
    validate_nonzero("gamma", gamma)?;
    validate_positive("t", t)?;

    let gamma2 = gamma * gamma;
    let decay = (-kappa * t).exp();
    let scale = gamma2 * (1.0 - decay) / (4.0 * kappa);
    let dof = 4.0 * kappa * level / gamma2;
    let noncentrality = 4.0 * kappa * initial * decay / (gamma2 * (1.0 - decay));
    validate_nonzero("dof + noncentrality", dof + noncentrality)?;

    let radicand = scale * (noncentrality - 1.0)
        + scale * dof
        + scale * dof / (2.0 * (dof + noncentrality));
    if radicand < 0.0 || radicand.is_nan() {
        return Err(ChfError::InvalidParameterDomain {
            parameter: "E[sqrt(x_t)] radicand".to_string(),
            value: radicand,
            constraint: "must be non-negative".to_string(),
        });
    }
    Ok(radicand.sqrt())
}

/// `√x_t ≈ level + excess·e^{-decay·t}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtPathFit {
    /// `a` (variance) or `m` (rate)
    pub level: f64,
    /// `b` (variance) or `n` (rate)
    pub excess: f64,
    /// `c` (variance) or `o` (rate)
    pub decay: f64,
}

impl SqrtPathFit {
    /// Fit the path of the factor named `factor` (used in error messages).
    pub fn fit(factor: &str, kappa: f64, gamma: f64, level: f64, initial: f64) -> ChfResult<Self> {
        validate_positive(&format!("{factor}.kappa"), kappa)?;
        validate_non_negative(&format!("{factor}.initial"), initial)?;

        let long_run_var = level - gamma * gamma / (8.0 * kappa);
        if long_run_var < 0.0 || long_run_var.is_nan() {
            return Err(ChfError::InvalidParameterDomain {
                parameter: format!("{factor}: level - gamma^2/(8 kappa)"),
                value: long_run_var,
                constraint: "must be non-negative for a real long-run volatility".to_string(),
            });
        }

        let a = long_run_var.sqrt();
        let b = initial.sqrt() - a;
        validate_nonzero(&format!("{factor}: sqrt(initial) - long-run volatility"), b)?;

        let pinned = expected_sqrt_cir(kappa, gamma, level, initial, FIT_TIME)?;
        let ratio = (pinned - a) / b;
        if !(ratio > 0.0 && ratio.is_finite()) {
            return Err(ChfError::InvalidParameterDomain {
                parameter: format!("{factor}: (L(1) - a)/b"),
                value: ratio,
                constraint: "must be positive for a real decay rate".to_string(),
            });
        }

        let fit = SqrtPathFit {
            level: a,
            excess: b,
            decay: -ratio.ln() / FIT_TIME,
        };
        debug!(factor, ?fit, "fitted expected square-root path");
        Ok(fit)
    }

    pub fn value(&self, t: f64) -> f64 {
        self.level + self.excess * (-self.decay * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_expected_sqrt_tracks_mean_variance() {
        // For small vol-of-vol E[√x_t] ≈ √E[x_t]
        let (kappa, gamma, level, initial, t): (f64, f64, f64, f64, f64) =
            (1.0, 0.001, 5e-5, 1e-4, 1.0);
        let mean = level + (initial - level) * (-kappa * t).exp();
        let value = expected_sqrt_cir(kappa, gamma, level, initial, t).expect("valid domain");
        assert_abs_diff_eq!(value, mean.sqrt(), epsilon = 5e-5);
    }

    #[test]
    fn test_fit_pins_path_at_endpoints() {
        let fit = SqrtPathFit::fit("variance", 1.2, 0.4, 0.05, 0.06).expect("valid domain");
        assert_abs_diff_eq!(fit.value(0.0), 0.06f64.sqrt(), epsilon = 1e-14);
        let pinned = expected_sqrt_cir(1.2, 0.4, 0.05, 0.06, FIT_TIME).unwrap();
        assert_abs_diff_eq!(fit.value(FIT_TIME), pinned, epsilon = 1e-14);
        assert_abs_diff_eq!(fit.value(1e3), fit.level, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_long_run_variance_is_rejected() {
        // θ = 0.01 < γ²/(8κ) = 0.25/8
        let err = SqrtPathFit::fit("variance", 1.0, 0.5, 0.01, 0.04).unwrap_err();
        assert!(matches!(err, ChfError::InvalidParameterDomain { .. }));
        assert!(format!("{}", err).contains("gamma^2/(8 kappa)"));
    }

    #[test]
    fn test_zero_vol_of_vol_is_singular() {
        let err = SqrtPathFit::fit("rate", 1.0, 0.0, 0.03, 0.02).unwrap_err();
        assert!(matches!(err, ChfError::SingularConfiguration { .. }));
    }

    #[test]
    fn test_start_on_long_run_level_is_singular() {
        // b = √x0 - a = 0
        let (kappa, gamma, level) = (2.0, 0.2, 0.04);
        let a2 = level - gamma * gamma / (8.0 * kappa);
        let err = SqrtPathFit::fit("variance", kappa, gamma, level, a2).unwrap_err();
        assert!(matches!(err, ChfError::SingularConfiguration { .. }));
    }
}
