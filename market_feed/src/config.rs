//! Feed configuration.

use market_common::defaults::{FALLBACK_PRICE, TICK_MAX_MS, TICK_MIN_MS};
use market_common::{FeedError, Result};
use std::time::Duration;

/// Tunables for a `SimulatedFeed`.
///
/// The defaults reproduce the reference behaviour: ticker periods drawn from
/// `[2000ms, 5000ms)`, a fallback price of 1000.0 for symbols outside the
/// catalog, and an entropy-seeded random source.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Lower bound (inclusive) of the per-symbol ticker period, in milliseconds.
    pub tick_min_ms: u64,
    /// Upper bound (exclusive) of the per-symbol ticker period, in milliseconds.
    pub tick_max_ms: u64,
    /// Starting price for symbols without a catalog baseline.
    pub fallback_price: f64,
    /// Fixed seed for reproducible price series; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_min_ms: TICK_MIN_MS,
            tick_max_ms: TICK_MAX_MS,
            fallback_price: FALLBACK_PRICE,
            seed: None,
        }
    }
}

impl FeedConfig {
    /// Override the ticker period range.
    pub fn with_tick_range(mut self, min: Duration, max: Duration) -> Self {
        self.tick_min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
        self.tick_max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration describes a usable feed.
    pub fn validate(&self) -> Result<()> {
        if self.tick_min_ms == 0 {
            return Err(FeedError::InvalidConfig(
                "tick_min_ms must be greater than zero".to_string(),
            ));
        }
        if self.tick_min_ms >= self.tick_max_ms {
            return Err(FeedError::InvalidConfig(format!(
                "tick_min_ms ({}) must be below tick_max_ms ({})",
                self.tick_min_ms, self.tick_max_ms
            )));
        }
        if !self.fallback_price.is_finite() || self.fallback_price <= 0.0 {
            return Err(FeedError::InvalidConfig(format!(
                "fallback_price must be a positive amount, got {}",
                self.fallback_price
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FeedConfig::default();
        assert_eq!(config.tick_min_ms, 2000);
        assert_eq!(config.tick_max_ms, 5000);
        assert_eq!(config.fallback_price, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_or_zero_tick_range() {
        let inverted = FeedConfig::default()
            .with_tick_range(Duration::from_millis(500), Duration::from_millis(500));
        assert!(matches!(inverted.validate(), Err(FeedError::InvalidConfig(_))));

        let zero = FeedConfig::default()
            .with_tick_range(Duration::ZERO, Duration::from_millis(10));
        assert!(matches!(zero.validate(), Err(FeedError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_tick_range_saturates() {
        let config = FeedConfig::default().with_tick_range(Duration::from_secs(1), Duration::MAX);
        assert_eq!(config.tick_min_ms, 1000);
        assert_eq!(config.tick_max_ms, u64::MAX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_fallback_price() {
        let config = FeedConfig {
            fallback_price: 0.0,
            ..FeedConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FeedConfig {
            fallback_price: f64::NAN,
            ..FeedConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
