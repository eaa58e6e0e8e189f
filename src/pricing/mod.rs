//! Pricing engine for rental quotes.
//!
//! Pure calculation functions plus the money and rate-unit models they
//! operate on. No clock access, no I/O; everything the booking flow charges
//! goes through here.

pub mod calculators;
pub mod models;

// Re-export commonly used items
pub use calculators::{compute_amount, compute_total_due, round_money, FeePolicy};
pub use models::{Money, RateUnit, UnitPrices};
