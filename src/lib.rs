//! Booking flow core for the JourneyHub rental marketplace.
//!
//! One shared wizard (details, availability, payment, confirmation) backs
//! every vertical the marketplace rents out: cars, campervans, hotel rooms
//! and pilgrimage tours. Presentation layers bind to a [`BookingFlow`] and
//! render its snapshots; real availability, payment and booking backends are
//! injected through the traits in [`booking::gateways`].

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;

// Re-export commonly used items
pub use booking::{BookingFlow, BookingSession, BookingStep, QuoteEdit, SessionView};
pub use config::BookingConfig;
pub use error::{BookingError, CatalogError, ConfigError};
pub use pricing::{compute_amount, compute_total_due, round_money, FeePolicy};
