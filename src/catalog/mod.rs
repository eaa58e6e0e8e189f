//! Catalog models and the listing read path.
//!
//! Listing records come from an injected [`CatalogProvider`]; the crate
//! ships an in-memory provider for fixtures and a moka-backed caching
//! decorator for real backends.

pub mod listings;
pub mod provider;

// Re-export commonly used items
pub use listings::{CampervanListing, CarListing, HotelListing, Listing, RateCard, TourListing};
pub use provider::{CachingCatalog, CatalogProvider, InMemoryCatalog};
