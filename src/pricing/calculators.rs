//! Core pricing calculation functions.
//!
//! Pure functions for rental pricing math - no clock access, no I/O.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{RateUnit, UnitPrices};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use journeyhub_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Platform fee charged on top of the rental amount.
///
/// The percentage is an explicit parameter of the totals calculation, never a
/// constant buried in a summary screen. The fee base is the rental amount
/// only; deposits are refundable and carry no fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeePolicy {
    pub percent: Decimal,
}

impl FeePolicy {
    pub fn percent(percent: Decimal) -> Self {
        Self { percent }
    }

    /// Fee for a rental amount, rounded to cents.
    pub fn fee_on(&self, rental_amount: Decimal) -> Decimal {
        round_money(rental_amount * self.percent / Decimal::ONE_HUNDRED, 2)
    }
}

impl Default for FeePolicy {
    /// The marketplace-wide 2% convenience fee.
    fn default() -> Self {
        Self {
            percent: Decimal::TWO,
        }
    }
}

/// Rental amount for a quote window.
///
/// The elapsed time between `start` and `end` is billed in whole units of
/// `rate_unit`, partial units rounding up. Returns zero when either bound is
/// missing, when the window is empty or inverted, or when the listing has no
/// price for the chosen unit.
pub fn compute_amount(
    unit_prices: &UnitPrices,
    rate_unit: RateUnit,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Decimal {
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        _ => return Decimal::ZERO,
    };

    let elapsed = (end - start).num_seconds();
    if elapsed <= 0 {
        return Decimal::ZERO;
    }

    let price = match unit_prices.get(rate_unit) {
        Some(p) => p,
        None => return Decimal::ZERO,
    };

    let span = rate_unit.seconds();
    let units = (elapsed + span - 1) / span;
    (Decimal::from(units) * price).max(Decimal::ZERO)
}

/// Total due at payment time: rental amount plus deposit plus the optional
/// platform fee.
pub fn compute_total_due(
    rental_amount: Decimal,
    deposit_amount: Decimal,
    fee: Option<FeePolicy>,
) -> Decimal {
    let fee_amount = fee
        .map(|f| f.fee_on(rental_amount))
        .unwrap_or(Decimal::ZERO);
    rental_amount + deposit_amount + fee_amount
}
