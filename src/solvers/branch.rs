//! Branch selection for complex logarithms
//!
//! A complex logarithm is only defined up to `2πik`. When a logarithm is
//! multiplied by a non-integer coefficient (as in the Heston `A` term), the
//! choice of `k` changes the characteristic function value, so a jump of the
//! principal branch along a frequency sweep shows up as a discontinuity.
//!
//! [`LogBranch::principal`] leaves every logarithm on the principal branch.
//! [`LogBranch::tracked`] remembers the imaginary part of each logarithm at the
//! previous sweep node and shifts the current value by the multiple of `2π`
//! that keeps it within `π` of its predecessor:
//! ```text
//! Im ln_k(z_n) = Im ln(z_n) + 2πk,   |Im ln_k(z_n) - Im ln(z_{n-1})| ≤ π
//! ```
//! Logarithms are identified by their evaluation order within one node, so a
//! model must request them in the same order at every node.

use std::f64::consts::PI;

#[derive(Clone, Debug)]
pub struct LogBranch {
    tracking: bool,
    previous: Vec<f64>,
    slot: usize,
}

impl LogBranch {
    /// Principal branch everywhere.
    pub fn principal() -> Self {
        LogBranch {
            tracking: false,
            previous: Vec::new(),
            slot: 0,
        }
    }

    /// Continuous branch along a sweep of frequency nodes.
    pub fn tracked() -> Self {
        LogBranch {
            tracking: true,
            previous: Vec::new(),
            slot: 0,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Start a new sweep node; the next logarithm is compared against the
    /// first logarithm of the previous node.
    pub fn begin_node(&mut self) {
        self.slot = 0;
    }

    /// Offset `2πk` to add to the imaginary part of a principal logarithm
    /// whose imaginary part is `principal_im`.
    pub fn winding(&mut self, principal_im: f64) -> f64 {
        if !self.tracking {
            return 0.0;
        }

        let offset = match self.previous.get(self.slot) {
            Some(&prev) => 2.0 * PI * ((prev - principal_im) / (2.0 * PI)).round(),
            None => 0.0,
        };

        let resolved = principal_im + offset;
        if self.slot < self.previous.len() {
            self.previous[self.slot] = resolved;
        } else {
            self.previous.push(resolved);
        }
        self.slot += 1;

        offset
    }
}

impl Default for LogBranch {
    fn default() -> Self {
        Self::principal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    #[test]
    fn test_principal_never_shifts() {
        let mut branch = LogBranch::principal();
        branch.begin_node();
        assert_eq!(branch.winding(3.0), 0.0);
        branch.begin_node();
        assert_eq!(branch.winding(-3.0), 0.0);
    }

    #[test]
    fn test_tracked_unwraps_across_negative_axis() {
        // Walk z around the origin twice; the tracked argument must keep growing.
        let mut branch = LogBranch::tracked();
        let mut last = 0.0;
        for step in 0..=400 {
            let angle = 4.0 * PI * step as f64 / 400.0;
            let z = Complex64::from_polar(1.0, angle);
            branch.begin_node();
            let principal = z.ln().im;
            let unwrapped = principal + branch.winding(principal);
            assert!(unwrapped >= last - 1e-12);
            last = unwrapped;
        }
        assert_abs_diff_eq!(last, 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut branch = LogBranch::tracked();
        branch.begin_node();
        branch.winding(3.1);
        branch.winding(0.0);

        branch.begin_node();
        let first = branch.winding(-3.1);
        let second = branch.winding(0.1);
        assert_abs_diff_eq!(first, 2.0 * PI);
        assert_eq!(second, 0.0);
    }
}
