//! Listing models for the four rental verticals.
//!
//! Each variant carries only its own fields; the booking flow never looks at
//! anything beyond the [`RateCard`] shape extracted here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::UnitPrices;

/// A bookable listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Car(CarListing),
    Campervan(CampervanListing),
    Hotel(HotelListing),
    TourPackage(TourListing),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarListing {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub transmission: String,
    pub seats: u8,
    pub city: String,
    pub unit_prices: UnitPrices,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampervanListing {
    pub id: Uuid,
    pub name: String,
    pub berths: u8,
    pub has_kitchen: bool,
    pub city: String,
    pub unit_prices: UnitPrices,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelListing {
    pub id: Uuid,
    pub name: String,
    pub star_rating: u8,
    pub room_type: String,
    pub city: String,
    /// Nightly rate lives under `per_day`.
    pub unit_prices: UnitPrices,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourListing {
    pub id: Uuid,
    pub name: String,
    pub departure_city: String,
    pub stops: Vec<String>,
    pub duration_days: u16,
    pub unit_prices: UnitPrices,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    pub currency: String,
}

/// The common commercial shape every vertical shares.
#[derive(Debug, Clone, Serialize)]
pub struct RateCard {
    pub listing_id: Uuid,
    pub unit_prices: UnitPrices,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
    pub currency: String,
}

impl Listing {
    pub fn id(&self) -> Uuid {
        match self {
            Listing::Car(c) => c.id,
            Listing::Campervan(c) => c.id,
            Listing::Hotel(h) => h.id,
            Listing::TourPackage(t) => t.id,
        }
    }

    /// Extract the pricing shape the booking flow consumes.
    pub fn rate_card(&self) -> RateCard {
        match self {
            Listing::Car(c) => RateCard {
                listing_id: c.id,
                unit_prices: c.unit_prices.clone(),
                deposit_amount: c.deposit_amount,
                currency: c.currency.clone(),
            },
            Listing::Campervan(c) => RateCard {
                listing_id: c.id,
                unit_prices: c.unit_prices.clone(),
                deposit_amount: c.deposit_amount,
                currency: c.currency.clone(),
            },
            Listing::Hotel(h) => RateCard {
                listing_id: h.id,
                unit_prices: h.unit_prices.clone(),
                deposit_amount: h.deposit_amount,
                currency: h.currency.clone(),
            },
            Listing::TourPackage(t) => RateCard {
                listing_id: t.id,
                unit_prices: t.unit_prices.clone(),
                deposit_amount: t.deposit_amount,
                currency: t.currency.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::RateUnit;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_card_from_car() {
        let id = Uuid::new_v4();
        let car = Listing::Car(CarListing {
            id,
            make: "Maruti".into(),
            model: "Swift".into(),
            transmission: "manual".into(),
            seats: 5,
            city: "Jaipur".into(),
            unit_prices: UnitPrices {
                per_hour: Some(dec!(150)),
                per_day: Some(dec!(2500)),
                ..UnitPrices::default()
            },
            deposit_amount: dec!(500),
            currency: "INR".into(),
        });

        let card = car.rate_card();
        assert_eq!(card.listing_id, id);
        assert_eq!(card.unit_prices.get(RateUnit::Day), Some(dec!(2500)));
        assert_eq!(card.deposit_amount, dec!(500));
        assert_eq!(card.currency, "INR");
    }

    #[test]
    fn test_rate_card_from_hotel() {
        let hotel = Listing::Hotel(HotelListing {
            id: Uuid::new_v4(),
            name: "Nomad Palace".into(),
            star_rating: 4,
            room_type: "deluxe".into(),
            city: "Rishikesh".into(),
            unit_prices: UnitPrices::daily(dec!(4200)),
            deposit_amount: dec!(1000),
            currency: "INR".into(),
        });

        let card = hotel.rate_card();
        assert_eq!(card.unit_prices.get(RateUnit::Day), Some(dec!(4200)));
        assert_eq!(card.unit_prices.get(RateUnit::Week), None);
    }

    #[test]
    fn test_listing_serializes_tagged() {
        let tour = Listing::TourPackage(TourListing {
            id: Uuid::new_v4(),
            name: "Char Dham Circuit".into(),
            departure_city: "Haridwar".into(),
            stops: vec!["Yamunotri".into(), "Gangotri".into()],
            duration_days: 11,
            unit_prices: UnitPrices::daily(dec!(3500)),
            deposit_amount: dec!(2000),
            currency: "INR".into(),
        });

        let json = serde_json::to_value(&tour).unwrap();
        assert_eq!(json["kind"], "tour_package");
        assert_eq!(json["deposit_amount"], "2000");
    }
}
