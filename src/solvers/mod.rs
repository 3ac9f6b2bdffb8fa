//! Numerical building blocks shared by the characteristic functions.

pub mod branch;
pub mod quadrature;
pub mod riccati;
