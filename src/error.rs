//! Error handling for the booking core.
//!
//! Every failure crosses the core/presentation boundary as a value: flow
//! methods return these types and the latest one is kept on the session
//! snapshot. The core never formats user-facing copy beyond the message.

use serde::Serialize;
use uuid::Uuid;

/// Failure raised by the booking flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    /// Missing or malformed user input. Recoverable inline on the current step.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Listing not free for the requested window. Recoverable by changing dates.
    #[error("not available: {0}")]
    Availability(String),

    /// Gateway declined or errored. Recoverable by retrying or switching method.
    #[error("payment failed: {0}")]
    Payment(String),

    /// Booking creation failed after the charge settled. Money may have moved
    /// without a confirmed reservation, so the transaction id is kept.
    #[error("booking registration failed after payment {transaction_id}: {message}")]
    BookingRegistration {
        transaction_id: String,
        message: String,
    },
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Validation(_) => ErrorKind::Validation,
            BookingError::Availability(_) => ErrorKind::Availability,
            BookingError::Payment(_) => ErrorKind::Payment,
            BookingError::BookingRegistration { .. } => ErrorKind::BookingRegistration,
        }
    }
}

/// Coarse error class for UI feedback (inline field error vs. banner vs. alert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Availability,
    Payment,
    BookingRegistration,
}

/// Serializable form of the last error, exposed on session snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&BookingError> for ErrorView {
    fn from(err: &BookingError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Failure from the listing read path.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("listing {0} not found")]
    NotFound(Uuid),

    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// Malformed environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
