//! The booking wizard state machine.
//!
//! One [`BookingFlow`] per open booking. All transitions run in response to
//! discrete calls from the presentation layer. Suspending collaborator calls
//! set the `pending` flag, and `advance`/`go_back` are no-ops while one is
//! in flight, so a double-click cannot double-charge.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogProvider, RateCard};
use crate::config::BookingConfig;
use crate::error::{BookingError, CatalogError, ErrorView};
use crate::pricing::{self, Money};

use super::gateways::{AvailabilityChecker, BookingRegistry, PaymentGateway};
use super::session::{
    Availability, BookingSession, BookingStep, PaymentMethod, QuoteEdit, SessionView,
};

pub struct BookingFlow<A, P, R> {
    checker: A,
    gateway: P,
    registry: R,
    config: BookingConfig,
    session: BookingSession,
    pending: bool,
    last_error: Option<BookingError>,
}

impl<A, P, R> BookingFlow<A, P, R>
where
    A: AvailabilityChecker,
    P: PaymentGateway,
    R: BookingRegistry,
{
    /// Open a flow for a listing's rate card. The quote starts with a
    /// default window of `lead_time` from now for `default_duration`.
    pub fn open(
        card: &RateCard,
        user_id: Uuid,
        config: BookingConfig,
        checker: A,
        gateway: P,
        registry: R,
    ) -> Self {
        let session = BookingSession::open(card, user_id, &config, Utc::now());
        info!(listing_id = %session.listing_id, %user_id, "Booking flow opened");
        Self {
            checker,
            gateway,
            registry,
            config,
            session,
            pending: false,
            last_error: None,
        }
    }

    /// Open a flow by resolving the listing through a catalog first.
    pub async fn open_for_listing<C: CatalogProvider>(
        catalog: &C,
        listing_id: Uuid,
        user_id: Uuid,
        config: BookingConfig,
        checker: A,
        gateway: P,
        registry: R,
    ) -> Result<Self, CatalogError> {
        let listing = catalog
            .listing(listing_id)
            .await?
            .ok_or(CatalogError::NotFound(listing_id))?;
        Ok(Self::open(
            &listing.rate_card(),
            user_id,
            config,
            checker,
            gateway,
            registry,
        ))
    }

    pub fn step(&self) -> BookingStep {
        self.session.step
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&BookingError> {
        self.last_error.as_ref()
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    /// Delay the caller should wait on the confirmation screen before
    /// closing the flow.
    pub fn auto_close_delay(&self) -> std::time::Duration {
        self.config.auto_close_delay
    }

    pub fn rental_amount(&self) -> Decimal {
        self.session.quote.rental_amount
    }

    /// Rental plus deposit plus the configured platform fee.
    pub fn total_due(&self) -> Decimal {
        pricing::compute_total_due(
            self.session.quote.rental_amount,
            self.session.quote.deposit_amount,
            self.config.platform_fee,
        )
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            listing_id: self.session.listing_id,
            step: self.session.step,
            quote: self.session.quote.clone(),
            availability: self.session.availability,
            payment_method: self.session.payment_method,
            transaction_id: self.session.transaction_id.clone(),
            booking_id: self.session.booking_id,
            rental_amount: Money::new(self.session.quote.rental_amount, &self.config.currency),
            total_due: Money::new(self.total_due(), &self.config.currency),
            pending: self.pending,
            last_error: self.last_error.as_ref().map(ErrorView::from),
        }
    }

    /// Apply one edit from the details form and reprice the quote.
    pub fn update_quote(&mut self, edit: QuoteEdit) {
        match edit {
            QuoteEdit::Start(t) => self.session.quote.start_time = Some(t),
            QuoteEdit::End(t) => self.session.quote.end_time = Some(t),
            QuoteEdit::RateUnit(u) => self.session.quote.rate_unit = u,
        }
        self.session.quote.reprice();

        // A window change makes the previous availability answer stale.
        if !matches!(edit, QuoteEdit::RateUnit(_)) {
            self.session.availability = Availability::Unchecked;
        }
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.session.payment_method = method;
    }

    pub fn set_payment_field(&mut self, name: &str, value: &str) {
        self.session
            .payment_fields
            .insert(name.to_string(), value.to_string());
    }

    /// Validate the current step and move forward one step. A no-op while a
    /// collaborator call is in flight; Confirmation is terminal.
    pub async fn advance(&mut self) -> Result<BookingStep, BookingError> {
        if self.pending {
            return Ok(self.session.step);
        }

        let result = match self.session.step {
            BookingStep::Details => self.advance_from_details(),
            BookingStep::Availability => self.advance_from_availability().await,
            BookingStep::Payment => self.advance_from_payment().await,
            BookingStep::Confirmation => Ok(BookingStep::Confirmation),
        };
        self.record(&result);
        result
    }

    /// Step back one screen. Allowed only from Availability and Payment, and
    /// a no-op while a collaborator call is in flight.
    pub fn go_back(&mut self) -> Result<BookingStep, BookingError> {
        if self.pending {
            return Ok(self.session.step);
        }

        let result = match self.session.step.prev() {
            Some(prev) => {
                self.session.step = prev;
                Ok(prev)
            }
            None => Err(BookingError::Validation(
                match self.session.step {
                    BookingStep::Details => "already on the first step",
                    _ => "a confirmed booking cannot go back",
                }
                .into(),
            )),
        };
        self.record(&result);
        result
    }

    /// Query the availability checker for the current window. Safe to call
    /// repeatedly; the stored tri-state always reflects the latest answer.
    pub async fn check_availability(&mut self) -> Result<Availability, BookingError> {
        if self.pending {
            return Ok(self.session.availability);
        }

        let (start, end) = match (self.session.quote.start_time, self.session.quote.end_time) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                let result = Err(BookingError::Validation(
                    "pick-up and drop-off times are required".into(),
                ));
                self.record(&result);
                return result;
            }
        };

        self.pending = true;
        let outcome = self.checker.check(self.session.listing_id, start, end).await;
        self.pending = false;

        let result = match outcome {
            Ok(free) => {
                self.session.availability = if free {
                    Availability::Available
                } else {
                    Availability::Unavailable
                };
                Ok(self.session.availability)
            }
            Err(e) => Err(BookingError::Availability(format!(
                "availability check failed: {e}"
            ))),
        };
        self.record(&result);
        result
    }

    /// Register the paid booking with the registry and return the booking
    /// id. Only callable once the gateway has settled the charge.
    pub async fn confirm_booking(&mut self) -> Result<Uuid, BookingError> {
        if self.pending {
            return Err(BookingError::Validation(
                "another operation is already in progress".into(),
            ));
        }

        let transaction_id = match self.session.transaction_id.clone() {
            Some(id) => id,
            None => {
                let result = Err(BookingError::Validation(
                    "booking has not been paid for yet".into(),
                ));
                self.record(&result);
                return result;
            }
        };
        let (start, end) = match (self.session.quote.start_time, self.session.quote.end_time) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                let result = Err(BookingError::Validation(
                    "quote window is incomplete".into(),
                ));
                self.record(&result);
                return result;
            }
        };

        self.pending = true;
        let outcome = self
            .registry
            .create_booking(self.session.listing_id, self.session.user_id, start, end)
            .await;
        self.pending = false;

        let result = match outcome {
            Ok(booking_id) => {
                self.session.booking_id = Some(booking_id);
                info!(
                    listing_id = %self.session.listing_id,
                    booking_id = %booking_id,
                    transaction_id,
                    "Booking registered"
                );
                Ok(booking_id)
            }
            Err(e) => {
                // Money has moved without a confirmed reservation. Keep the
                // transaction id on the session and send the user back to
                // Payment so support can reconcile.
                self.session.step = BookingStep::Payment;
                error!(
                    listing_id = %self.session.listing_id,
                    %transaction_id,
                    error = %e,
                    "Booking registration failed after successful payment"
                );
                Err(BookingError::BookingRegistration {
                    transaction_id,
                    message: e.to_string(),
                })
            }
        };
        self.record(&result);
        result
    }

    fn advance_from_details(&mut self) -> Result<BookingStep, BookingError> {
        let quote = &mut self.session.quote;
        let (start, end) = match (quote.start_time, quote.end_time) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                return Err(BookingError::Validation(
                    "pick-up and drop-off times are required".into(),
                ))
            }
        };
        if end <= start {
            return Err(BookingError::Validation(
                "drop-off must be after pick-up".into(),
            ));
        }

        // Freeze the amount the later steps will charge.
        quote.reprice();
        self.step_forward();
        info!(
            listing_id = %self.session.listing_id,
            amount = %self.session.quote.rental_amount,
            "Quote accepted"
        );
        Ok(self.session.step)
    }

    async fn advance_from_availability(&mut self) -> Result<BookingStep, BookingError> {
        if self.session.availability == Availability::Unchecked {
            self.check_availability().await?;
        }

        match self.session.availability {
            Availability::Available => {
                self.step_forward();
                Ok(self.session.step)
            }
            _ => {
                warn!(
                    listing_id = %self.session.listing_id,
                    "Listing unavailable for requested window"
                );
                Err(BookingError::Availability(
                    "listing is not available for the selected dates".into(),
                ))
            }
        }
    }

    async fn advance_from_payment(&mut self) -> Result<BookingStep, BookingError> {
        let method = self.session.payment_method;
        for field in method.required_fields() {
            let missing = self
                .session
                .payment_fields
                .get(*field)
                .map_or(true, |v| v.trim().is_empty());
            if missing {
                return Err(BookingError::Validation(format!("{field} is required")));
            }
        }

        let amount = self.total_due();
        self.pending = true;
        let outcome = self.charge(amount, method).await;
        self.pending = false;

        let transaction_id = outcome?;
        self.session.transaction_id = Some(transaction_id.clone());
        self.step_forward();
        info!(
            listing_id = %self.session.listing_id,
            transaction_id,
            amount = %amount,
            "Payment settled"
        );
        Ok(self.session.step)
    }

    async fn charge(&mut self, amount: Decimal, method: PaymentMethod) -> Result<String, BookingError> {
        let metadata = json!({
            "listing_id": self.session.listing_id,
            "user_id": self.session.user_id,
        });
        let intent = self
            .gateway
            .create_intent(amount, &self.config.currency, metadata)
            .await
            .map_err(|e| BookingError::Payment(format!("could not start payment: {e}")))?;

        let outcome = self
            .gateway
            .process(&intent.id, method, &self.session.payment_fields)
            .await
            .map_err(|e| BookingError::Payment(format!("payment failed: {e}")))?;

        if !outcome.success {
            let reason = outcome
                .decline_reason
                .unwrap_or_else(|| "payment was declined".to_string());
            warn!(
                listing_id = %self.session.listing_id,
                intent_id = %intent.id,
                %reason,
                "Gateway declined payment"
            );
            return Err(BookingError::Payment(reason));
        }

        outcome.transaction_id.ok_or_else(|| {
            BookingError::Payment("gateway reported success without a transaction id".into())
        })
    }

    fn step_forward(&mut self) {
        if let Some(next) = self.session.step.next() {
            self.session.step = next;
        }
    }

    fn record<T>(&mut self, result: &Result<T, BookingError>) {
        match result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.clone()),
        }
    }
}
