pub mod cumulants;
