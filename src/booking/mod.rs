//! Booking session model and the wizard state machine.

pub mod gateways;
pub mod machine;
pub mod session;

// Re-export commonly used items
pub use gateways::{
    AvailabilityChecker, BookingRegistry, GatewayError, PaymentGateway, PaymentIntent,
    PaymentOutcome,
};
pub use machine::BookingFlow;
pub use session::{
    Availability, BookingSession, BookingStep, PaymentMethod, QuoteEdit, RentalQuote, SessionView,
};
