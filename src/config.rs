//! Runtime configuration for the booking flow.

use std::env;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::error::ConfigError;
use crate::pricing::FeePolicy;

/// Tunables for the booking flow. Everything has a sensible default; hosts
/// override via struct update syntax or [`BookingConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Currency for quotes and payment intents.
    pub currency: String,
    /// Platform fee on rentals; `None` waives the fee entirely.
    pub platform_fee: Option<FeePolicy>,
    /// Offset from "now" to the default start of a fresh quote.
    pub lead_time: chrono::Duration,
    /// Length of the default quote window.
    pub default_duration: chrono::Duration,
    /// How long the presentation layer should keep the confirmation screen
    /// up before closing the flow. The core never sleeps on this itself.
    pub auto_close_delay: Duration,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            platform_fee: Some(FeePolicy::default()),
            lead_time: chrono::Duration::hours(1),
            default_duration: chrono::Duration::days(1),
            auto_close_delay: Duration::from_secs(3),
        }
    }
}

impl BookingConfig {
    /// Load overrides from `JOURNEYHUB_*` environment variables. Unset
    /// variables keep their defaults; malformed values error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Ok(v) = env::var("JOURNEYHUB_CURRENCY") {
            cfg.currency = v;
        }

        if let Ok(v) = env::var("JOURNEYHUB_FEE_PERCENT") {
            let percent: Decimal = v.parse().map_err(|_| ConfigError::Invalid {
                var: "JOURNEYHUB_FEE_PERCENT",
                value: v.clone(),
            })?;
            cfg.platform_fee = if percent.is_zero() {
                None
            } else {
                Some(FeePolicy::percent(percent))
            };
        }

        if let Ok(v) = env::var("JOURNEYHUB_AUTO_CLOSE_SECS") {
            let secs: u64 = v.parse().map_err(|_| ConfigError::Invalid {
                var: "JOURNEYHUB_AUTO_CLOSE_SECS",
                value: v.clone(),
            })?;
            cfg.auto_close_delay = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let cfg = BookingConfig::default();
        assert_eq!(cfg.currency, "INR");
        assert_eq!(cfg.platform_fee, Some(FeePolicy::percent(dec!(2))));
        assert_eq!(cfg.lead_time, chrono::Duration::hours(1));
        assert_eq!(cfg.default_duration, chrono::Duration::days(1));
        assert_eq!(cfg.auto_close_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("JOURNEYHUB_CURRENCY", "EUR");
        env::set_var("JOURNEYHUB_FEE_PERCENT", "0");
        env::set_var("JOURNEYHUB_AUTO_CLOSE_SECS", "10");

        let cfg = BookingConfig::from_env().unwrap();
        assert_eq!(cfg.currency, "EUR");
        assert_eq!(cfg.platform_fee, None);
        assert_eq!(cfg.auto_close_delay, Duration::from_secs(10));

        env::set_var("JOURNEYHUB_FEE_PERCENT", "not-a-number");
        assert!(BookingConfig::from_env().is_err());

        env::remove_var("JOURNEYHUB_CURRENCY");
        env::remove_var("JOURNEYHUB_FEE_PERCENT");
        env::remove_var("JOURNEYHUB_AUTO_CLOSE_SECS");
    }
}
