//! Value records produced by the simulated feed.
//!
//! A `Quote` is one synthesized snapshot of a symbol's trading data. Every record
//! handed out by the feed is an owned copy; none of them is a live view into feed
//! state. All records serialize with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Synthesized quote for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Lowercase form of `symbol`.
    pub id: String,
    /// Symbol identifier (uppercase alphanumeric).
    pub symbol: String,
    /// Human-readable company name.
    pub display_name: String,
    /// Price after this tick.
    pub price: f64,
    /// Absolute change drawn for this tick.
    pub change: f64,
    /// Relative change drawn for this tick, in percent.
    pub change_percent: f64,
    /// Session high (jitter above `price`).
    pub high: f64,
    /// Session low (jitter below `price`).
    pub low: f64,
    /// Price before this tick.
    pub open: f64,
    /// Synthetic traded volume.
    pub volume: u64,
    /// Synthetic market capitalisation.
    pub market_cap: f64,
    /// Sector label.
    pub sector: String,
}

impl Quote {
    /// Encode the quote to a JSON string.
    pub fn to_json(&self) -> Result<String, FeedError> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }
}

/// Snapshot of a market index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    /// Index name, e.g. `NIFTY 50`.
    pub name: String,
    /// Current index level.
    pub value: f64,
    /// Absolute change.
    pub change: f64,
    /// Relative change in percent.
    pub change_percent: f64,
}

/// Best and worst performers of one movers computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMovers {
    /// Positive movers, highest `change_percent` first.
    pub gainers: Vec<Quote>,
    /// Negative movers, lowest `change_percent` first.
    pub losers: Vec<Quote>,
}

/// Resolution of a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    /// One candle per day.
    Daily,
    /// One candle per five minutes.
    Intraday,
}

/// One OHLCV point of a historical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Start of the period this candle covers.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
}
