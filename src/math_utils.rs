// src/math_utils.rs
use num_complex::Complex64;

/// The imaginary unit.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Below this magnitude the short Taylor series are exact to double precision.
const SERIES_CUTOFF: f64 = 1e-4;

/// `exp(z) - 1` without cancellation for small `|z|`.
///
/// Uses `e^x cos y - 1 = expm1(x) cos y - 2 sin²(y/2)` for the real part.
pub fn exp_m1(z: Complex64) -> Complex64 {
    let (x, y) = (z.re, z.im);
    let half_sin = (0.5 * y).sin();
    Complex64::new(
        x.exp_m1() * y.cos() - 2.0 * half_sin * half_sin,
        x.exp() * y.sin(),
    )
}

/// `ln(1 + w)` on the principal branch, accurate for small `|w|`.
pub fn ln_1p(w: Complex64) -> Complex64 {
    if w.norm() < SERIES_CUTOFF {
        w * ln_1p_ratio(w)
    } else {
        (Complex64::new(1.0, 0.0) + w).ln()
    }
}

/// `ln(1 + w) / w`, continuous through `w = 0` where it equals 1.
pub fn ln_1p_ratio(w: Complex64) -> Complex64 {
    if w.norm() < SERIES_CUTOFF {
        Complex64::new(1.0, 0.0) - w * (0.5 - w * (1.0 / 3.0 - w * 0.25))
    } else {
        (Complex64::new(1.0, 0.0) + w).ln() / w
    }
}

/// `∫_0^t e^{rate·z} dz`, equal to `t` in the limit `rate → 0`.
pub fn exp_integral(rate: Complex64, t: f64) -> Complex64 {
    let z = rate * t;
    if z.norm() < SERIES_CUTOFF {
        t * (1.0 + z * (0.5 + z * (1.0 / 6.0 + z / 24.0)))
    } else {
        exp_m1(z) / rate
    }
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exp_m1_matches_exp_away_from_zero() {
        let z = Complex64::new(0.7, -1.3);
        assert_abs_diff_eq!((exp_m1(z) - (z.exp() - 1.0)).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_exp_m1_small_argument() {
        // Re = x + x²/2 - y²/2, Im = y(1 + x) to second order
        let z = Complex64::new(1e-12, 2e-12);
        let value = exp_m1(z);
        assert_abs_diff_eq!(value.re, 1e-12 - 1.5e-24, epsilon = 1e-26);
        assert_abs_diff_eq!(value.im, 2e-12 + 2e-24, epsilon = 1e-26);
    }

    #[test]
    fn test_ln_1p_branches_agree_at_cutoff() {
        let w = Complex64::new(0.6e-4, 0.8e-4);
        let series = w * (Complex64::new(1.0, 0.0) - w * (0.5 - w * (1.0 / 3.0 - w * 0.25)));
        let direct = (Complex64::new(1.0, 0.0) + w).ln();
        assert_abs_diff_eq!((series - direct).norm(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ln_1p_ratio(Complex64::new(0.0, 0.0)).re, 1.0);
    }

    #[test]
    fn test_exp_integral_limits() {
        let t = 2.5;
        assert_abs_diff_eq!(exp_integral(Complex64::new(0.0, 0.0), t).re, t);

        let rate = Complex64::new(-0.8, 0.3);
        let closed = ((rate * t).exp() - 1.0) / rate;
        assert_abs_diff_eq!((exp_integral(rate, t) - closed).norm(), 0.0, epsilon = 1e-14);

        let tiny = Complex64::new(1e-9, -1e-9);
        let value = exp_integral(tiny, t);
        assert_abs_diff_eq!(value.re, t, epsilon = 1e-7);
    }
}
