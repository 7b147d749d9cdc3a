//! Volume discount function.
//!
//! Reads a shop-level rules blob, matches cart lines against the configured
//! products and emits at most one product discount operation once the combined
//! quantity of matching lines reaches the configured minimum.

pub mod config;
pub mod discount;
pub mod error;
pub mod telemetry;
