//! Domain models and utilities for the simulated feed.
//!
//! - `quote_generator` — pure quote/index/history synthesis.
//! - `observer` — the `QuoteObserver` seam and its closure/channel adapters.
//! - `movers` — gainers/losers ranking.

pub mod movers;
pub mod observer;
pub mod quote_generator;
