// src/error.rs
use num_complex::Complex64;
use thiserror::Error;

/// Error types for the fast-chf library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChfError {
    /// Parameter combination outside the domain where the formulas are real-valued
    #[error("Invalid parameter domain for '{parameter}' = {value}: {constraint}")]
    InvalidParameterDomain {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A closed-form expression divides by zero for this configuration
    #[error("Singular configuration: {quantity} vanishes ({reason})")]
    SingularConfiguration { quantity: String, reason: String },

    /// Invalid evaluator configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// The evaluation produced a non-finite value
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for fast-chf operations
pub type ChfResult<T> = Result<T, ChfError>;

/// Validation utilities
pub mod validation {
    use super::{ChfError, ChfResult, Complex64};

    /// Magnitude below which a denominator is treated as zero.
    pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

    /// Largest quadrature grid accepted by [`validate_grid_size`].
    pub const MAX_GRID_SIZE: usize = 1_000_000;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> ChfResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(ChfError::InvalidParameterDomain {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> ChfResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(ChfError::InvalidParameterDomain {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> ChfResult<()> {
        if !value.is_finite() {
            Err(ChfError::InvalidParameterDomain {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Reject a real denominator that is (numerically) zero
    pub fn validate_nonzero(quantity: &str, value: f64) -> ChfResult<()> {
        if value.abs() < SINGULARITY_TOLERANCE {
            Err(ChfError::SingularConfiguration {
                quantity: quantity.to_string(),
                reason: format!("denominator is {}", value),
            })
        } else {
            Ok(())
        }
    }

    /// Reject a complex denominator that is (numerically) zero
    pub fn validate_nonzero_complex(quantity: &str, value: Complex64) -> ChfResult<()> {
        if value.norm() < SINGULARITY_TOLERANCE {
            Err(ChfError::SingularConfiguration {
                quantity: quantity.to_string(),
                reason: format!("denominator is {}", value),
            })
        } else {
            Ok(())
        }
    }

    /// Validate quadrature grid size
    pub fn validate_grid_size(grid_size: usize) -> ChfResult<()> {
        if grid_size < 2 {
            Err(ChfError::InvalidConfiguration {
                field: "grid_size".to_string(),
                reason: "trapezoidal rule needs at least 2 nodes".to_string(),
            })
        } else if grid_size > MAX_GRID_SIZE {
            Err(ChfError::InvalidConfiguration {
                field: "grid_size".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_GRID_SIZE),
            })
        } else {
            Ok(())
        }
    }
}
