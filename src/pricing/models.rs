//! Models for the pricing engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billing granularity for a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    Hour,
    Day,
    Week,
    Month,
}

impl RateUnit {
    /// Span of one billing unit in seconds. A month is billed as 30 days.
    pub fn seconds(self) -> i64 {
        match self {
            RateUnit::Hour => 3_600,
            RateUnit::Day => 86_400,
            RateUnit::Week => 7 * 86_400,
            RateUnit::Month => 30 * 86_400,
        }
    }
}

/// Per-unit listed prices. A listing publishes whichever subset of units it
/// rents at; hotels typically list only a nightly (day) rate while cars list
/// hourly through monthly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPrices {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub per_hour: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub per_day: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub per_week: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub per_month: Option<Decimal>,
}

impl UnitPrices {
    pub fn get(&self, unit: RateUnit) -> Option<Decimal> {
        match unit {
            RateUnit::Hour => self.per_hour,
            RateUnit::Day => self.per_day,
            RateUnit::Week => self.per_week,
            RateUnit::Month => self.per_month,
        }
    }

    /// Prices with only a daily rate, the shape hotel listings use.
    pub fn daily(amount: Decimal) -> Self {
        Self {
            per_day: Some(amount),
            ..Self::default()
        }
    }
}

/// Money value for snapshots and summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_prices_lookup() {
        let prices = UnitPrices {
            per_hour: Some(dec!(150)),
            per_day: Some(dec!(2500)),
            ..UnitPrices::default()
        };
        assert_eq!(prices.get(RateUnit::Hour), Some(dec!(150)));
        assert_eq!(prices.get(RateUnit::Day), Some(dec!(2500)));
        assert_eq!(prices.get(RateUnit::Week), None);
        assert_eq!(prices.get(RateUnit::Month), None);
    }

    #[test]
    fn test_daily_shape() {
        let prices = UnitPrices::daily(dec!(4200));
        assert_eq!(prices.get(RateUnit::Day), Some(dec!(4200)));
        assert_eq!(prices.get(RateUnit::Hour), None);
    }

    #[test]
    fn test_rate_unit_spans() {
        assert_eq!(RateUnit::Hour.seconds(), 3_600);
        assert_eq!(RateUnit::Day.seconds(), 86_400);
        assert_eq!(RateUnit::Week.seconds(), 604_800);
        assert_eq!(RateUnit::Month.seconds(), 2_592_000);
    }
}
