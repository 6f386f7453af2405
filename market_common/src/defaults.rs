//! Shared constants for the simulated feed.

/// Lower bound (inclusive) of the randomized ticker period, in milliseconds.
pub const TICK_MIN_MS: u64 = 2000;
/// Upper bound (exclusive) of the randomized ticker period, in milliseconds.
pub const TICK_MAX_MS: u64 = 5000;
/// Baseline price used for symbols missing from the catalog.
pub const FALLBACK_PRICE: f64 = 1000.0;
/// Sector label for symbols missing from the catalog.
pub const FALLBACK_SECTOR: &str = "Others";
/// Maximum number of entries in each top-movers list.
pub const TOP_MOVERS_LIMIT: usize = 5;
/// Number of candles in a synthesized historical series.
pub const HISTORY_POINTS: usize = 30;
