//! Booking session state: wizard step, quote, payment details.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::RateCard;
use crate::config::BookingConfig;
use crate::error::ErrorView;
use crate::pricing::{self, Money, RateUnit, UnitPrices};

/// Wizard steps, in order. Transitions move one step at a time; there is no
/// skipping in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Details,
    Availability,
    Payment,
    Confirmation,
}

impl BookingStep {
    pub(crate) fn next(self) -> Option<Self> {
        match self {
            BookingStep::Details => Some(BookingStep::Availability),
            BookingStep::Availability => Some(BookingStep::Payment),
            BookingStep::Payment => Some(BookingStep::Confirmation),
            BookingStep::Confirmation => None,
        }
    }

    /// Confirmation is terminal short of closing the whole session.
    pub(crate) fn prev(self) -> Option<Self> {
        match self {
            BookingStep::Details => None,
            BookingStep::Availability => Some(BookingStep::Details),
            BookingStep::Payment => Some(BookingStep::Availability),
            BookingStep::Confirmation => None,
        }
    }
}

/// Result of the latest availability query for the quote window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Unchecked,
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
}

impl PaymentMethod {
    /// Field names the method requires to be present and non-empty. Only the
    /// active method's fields are ever validated.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            PaymentMethod::Card => &["card_number", "expiry_date", "cvv", "card_holder"],
            PaymentMethod::Upi => &["upi_id"],
            PaymentMethod::NetBanking => &["bank_account"],
        }
    }
}

/// A rental quote being edited. `rental_amount` is derived from the other
/// fields and recomputed on every edit; it is never set directly.
#[derive(Debug, Clone, Serialize)]
pub struct RentalQuote {
    pub unit_prices: UnitPrices,
    pub rate_unit: RateUnit,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rental_amount: Decimal,
}

impl RentalQuote {
    pub(crate) fn open(card: &RateCard, config: &BookingConfig, now: DateTime<Utc>) -> Self {
        let mut quote = Self {
            unit_prices: card.unit_prices.clone(),
            rate_unit: RateUnit::Day,
            start_time: Some(now + config.lead_time),
            end_time: Some(now + config.default_duration),
            deposit_amount: card.deposit_amount,
            rental_amount: Decimal::ZERO,
        };
        quote.reprice();
        quote
    }

    /// Recompute the derived rental amount from the current fields.
    pub(crate) fn reprice(&mut self) {
        self.rental_amount = pricing::compute_amount(
            &self.unit_prices,
            self.rate_unit,
            self.start_time,
            self.end_time,
        );
    }
}

/// A single edit to the quote from the details form.
#[derive(Debug, Clone, Copy)]
pub enum QuoteEdit {
    Start(DateTime<Utc>),
    End(DateTime<Utc>),
    RateUnit(RateUnit),
}

/// Everything the flow tracks for one open booking. One session per open
/// flow; discarded when the flow closes or completes.
#[derive(Debug, Clone)]
pub struct BookingSession {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub step: BookingStep,
    pub quote: RentalQuote,
    pub availability: Availability,
    pub payment_method: PaymentMethod,
    pub payment_fields: HashMap<String, String>,
    pub transaction_id: Option<String>,
    pub booking_id: Option<Uuid>,
}

impl BookingSession {
    pub(crate) fn open(
        card: &RateCard,
        user_id: Uuid,
        config: &BookingConfig,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            listing_id: card.listing_id,
            user_id,
            step: BookingStep::Details,
            quote: RentalQuote::open(card, config, now),
            availability: Availability::Unchecked,
            payment_method: PaymentMethod::Card,
            payment_fields: HashMap::new(),
            transaction_id: None,
            booking_id: None,
        }
    }
}

/// Read-only snapshot handed to the presentation layer. Raw payment fields
/// stay out of it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub listing_id: Uuid,
    pub step: BookingStep,
    pub quote: RentalQuote,
    pub availability: Availability,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub booking_id: Option<Uuid>,
    pub rental_amount: Money,
    pub total_due: Money,
    pub pending: bool,
    pub last_error: Option<ErrorView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(BookingStep::Details.next(), Some(BookingStep::Availability));
        assert_eq!(
            BookingStep::Availability.next(),
            Some(BookingStep::Payment)
        );
        assert_eq!(
            BookingStep::Payment.next(),
            Some(BookingStep::Confirmation)
        );
        assert_eq!(BookingStep::Confirmation.next(), None);

        assert_eq!(BookingStep::Details.prev(), None);
        assert_eq!(BookingStep::Payment.prev(), Some(BookingStep::Availability));
        assert_eq!(BookingStep::Confirmation.prev(), None);
    }

    #[test]
    fn test_required_fields_per_method() {
        assert_eq!(
            PaymentMethod::Card.required_fields(),
            ["card_number", "expiry_date", "cvv", "card_holder"]
        );
        assert_eq!(PaymentMethod::Upi.required_fields(), ["upi_id"]);
        assert_eq!(
            PaymentMethod::NetBanking.required_fields(),
            ["bank_account"]
        );
    }
}
