// src/models/model.rs
use crate::error::{ChfError, ChfResult};
use crate::solvers::branch::LogBranch;
use ndarray::parallel::prelude::*;
use ndarray::Array1;
use num_complex::Complex64;

/// Characteristic function `φ(u) = E[exp(iu ln S_T)]` of a log-price model,
/// without the discount factor.
///
/// Implementors only provide [`log_cf_with`](Self::log_cf_with); evaluation,
/// batching and sweeps are derived from it.
pub trait CharacteristicFunction: Sync {
    /// Short model name for diagnostics.
    fn name(&self) -> &'static str;

    /// `ln φ(u)` with every branch-sensitive logarithm resolved through `branch`.
    fn log_cf_with(&self, u: Complex64, branch: &mut LogBranch) -> ChfResult<Complex64>;

    /// `ln φ(u)` on the principal branch.
    fn log_cf(&self, u: Complex64) -> ChfResult<Complex64> {
        self.log_cf_with(u, &mut LogBranch::principal())
    }

    /// `φ(u)` at a complex frequency.
    fn evaluate(&self, u: Complex64) -> ChfResult<Complex64> {
        finite_exp(self.name(), u, self.log_cf(u)?)
    }

    /// `φ(u)` at a real frequency.
    fn evaluate_real(&self, u: f64) -> ChfResult<Complex64> {
        self.evaluate(Complex64::new(u, 0.0))
    }

    /// Elementwise evaluation; the output has the shape of `u`.
    fn evaluate_many(&self, u: &Array1<Complex64>) -> ChfResult<Array1<Complex64>> {
        u.iter()
            .map(|&ui| self.evaluate(ui))
            .collect::<ChfResult<Vec<_>>>()
            .map(Array1::from)
    }

    /// Elementwise evaluation over real frequencies.
    fn evaluate_grid(&self, u: &Array1<f64>) -> ChfResult<Array1<Complex64>> {
        u.iter()
            .map(|&ui| self.evaluate_real(ui))
            .collect::<ChfResult<Vec<_>>>()
            .map(Array1::from)
    }

    /// Data-parallel [`evaluate_many`](Self::evaluate_many); identical results.
    fn par_evaluate_many(&self, u: &Array1<Complex64>) -> ChfResult<Array1<Complex64>> {
        u.par_iter()
            .map(|&ui| self.evaluate(ui))
            .collect::<ChfResult<Vec<_>>>()
            .map(Array1::from)
    }

    /// Evaluate along a monotone sweep of real frequencies, keeping every
    /// logarithm on the branch continuous with the previous node.
    fn evaluate_sweep(&self, u: &[f64]) -> ChfResult<Array1<Complex64>> {
        let mut branch = LogBranch::tracked();
        u.iter()
            .map(|&ui| {
                branch.begin_node();
                let z = Complex64::new(ui, 0.0);
                finite_exp(self.name(), z, self.log_cf_with(z, &mut branch)?)
            })
            .collect::<ChfResult<Vec<_>>>()
            .map(Array1::from)
    }
}

fn finite_exp(method: &str, u: Complex64, log_value: Complex64) -> ChfResult<Complex64> {
    let value = log_value.exp();
    if value.re.is_finite() && value.im.is_finite() {
        Ok(value)
    } else {
        Err(ChfError::NumericalInstability {
            method: method.to_string(),
            reason: format!("φ({}) = exp({}) is not finite", u, log_value),
        })
    }
}
