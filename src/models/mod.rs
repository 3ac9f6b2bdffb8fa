pub mod bates;
pub mod black_scholes;
pub mod extended_bates;
pub mod heston;
pub mod model;
