//! # fast-chf: Characteristic Functions for Fourier Option Pricing
//!
//! Characteristic functions of the log-asset price under Black-Scholes, Heston,
//! Bates, and a Bates model extended with a stochastic short rate and a
//! stochastic price/variance correlation. The values feed Fourier pricers such
//! as the COS method.
//!
//! ## Key Features
//!
//! - **Stable closed forms**: trap-free Heston formulation with cancellation-free
//!   evaluation, well-defined at zero vol-of-vol
//! - **Branch tracking**: sweeps over real frequencies keep every logarithm continuous
//! - **Batch evaluation**: sequential or Rayon-parallel over `ndarray` grids
//! - **Semi-closed-form extended model**: trapezoidal quadrature with a configurable grid
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_chf::models::heston::{HestonCf, HestonParams};
//! use fast_chf::models::model::CharacteristicFunction;
//!
//! let cf = HestonCf::new(HestonParams {
//!     r: 0.02,
//!     tau: 1.0,
//!     kappa: 1.5,
//!     gamma: 0.3,
//!     vbar: 0.04,
//!     v0: 0.04,
//!     rho: -0.7,
//! });
//!
//! let phi = cf.evaluate_real(1.0).expect("finite value");
//! assert!((phi.re - 0.9789687476374485).abs() < 1e-12);
//! ```
//!
//! ## Conventions
//!
//! `φ(u) = E[exp(iu ln(S_T/S_0))]` with no discount factor; pricers apply
//! `e^{-rτ}` themselves.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod models;
pub mod solvers;

// Re-export commonly used types for convenience
pub use error::{ChfError, ChfResult};
pub use models::bates::{BatesCf, JumpParams};
pub use models::black_scholes::BlackScholesCf;
pub use models::extended_bates::{
    CorrelationParams, ExtendedBatesCf, ExtendedBatesParams, RateParams, VarianceParams,
};
pub use models::heston::{HestonCf, HestonParams};
pub use models::model::CharacteristicFunction;
pub use solvers::quadrature::QuadratureConfig;
