//!
//! Common types and utilities shared by the market feed and its consumers.
//!
//! This crate aggregates:
//! - `error` — unified error type `FeedError` used across the workspace.
//! - `result` — handy `Result<T, FeedError>` alias.
//! - `catalog` — the fixed symbol catalog (names, sectors, baseline prices) and
//!   symbol-list parsing.
//! - `quote` — value records produced by the feed (`Quote`, `MarketIndex`,
//!   `TopMovers`, `Candle`).
//! - `defaults` — shared constants for tick periods and fallback pricing.
#![warn(missing_docs)]
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod quote;
pub mod result;

pub use catalog::Ticker;
pub use error::FeedError;
pub use quote::{Candle, MarketIndex, Quote, Timeframe, TopMovers};
pub use result::Result;
