//! Interfaces to the external booking collaborators.
//!
//! Real availability, payment and registry backends live in the host
//! application; the flow only depends on these traits. Every call may
//! suspend and may fail, and a failure never aborts the session.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::session::PaymentMethod;

/// Transport-level failure from a collaborator. The flow wraps it into its
/// own tagged error kinds before it reaches the presentation layer.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

impl From<&str> for GatewayError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for GatewayError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Answers whether a listing is free for a window.
pub trait AvailabilityChecker {
    fn check(
        &self,
        listing_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool, GatewayError>> + Send;
}

/// Gateway-side placeholder for an amount to be charged, created before the
/// actual charge attempt.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
}

/// Result of a charge attempt. A declined charge is a successful call with
/// `success == false`, not a transport error.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub decline_reason: Option<String>,
}

impl PaymentOutcome {
    pub fn settled(transaction_id: &str) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.to_string()),
            decline_reason: None,
        }
    }

    pub fn declined(reason: &str) -> Self {
        Self {
            success: false,
            transaction_id: None,
            decline_reason: Some(reason.to_string()),
        }
    }
}

/// Two-phase payment: create an intent for the amount, then process it with
/// the user's method and fields.
pub trait PaymentGateway {
    fn create_intent(
        &self,
        amount: Decimal,
        currency: &str,
        metadata: Value,
    ) -> impl Future<Output = Result<PaymentIntent, GatewayError>> + Send;

    fn process(
        &self,
        intent_id: &str,
        method: PaymentMethod,
        fields: &HashMap<String, String>,
    ) -> impl Future<Output = Result<PaymentOutcome, GatewayError>> + Send;
}

/// Registers a confirmed booking once payment has settled.
pub trait BookingRegistry {
    fn create_booking(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Uuid, GatewayError>> + Send;
}
