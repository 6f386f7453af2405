//! Synthetic quote, index and history generation.
//!
//! Everything in this module is a pure function of a random source and the
//! inputs it is given. The feed decides which price a tick starts from and where
//! the result is stored; `QuoteGenerator` only does the arithmetic.

use chrono::{DateTime, Duration, Utc};
use market_common::catalog;
use market_common::defaults::HISTORY_POINTS;
use market_common::{Candle, MarketIndex, Quote, Timeframe};
use rand::Rng;

/// Maximum absolute per-tick move, in percent.
pub const MAX_CHANGE_PERCENT: f64 = 2.0;
/// A tick never drops the price below this fraction of the previous price.
pub const PRICE_FLOOR_RATIO: f64 = 0.95;
/// Upper bound of the one-sided high/low jitter around the new price.
const HIGH_LOW_JITTER: f64 = 0.02;

/// Baseline and spreads for one market index.
struct IndexSpec {
    name: &'static str,
    base: f64,
    value_spread: f64,
    change_spread: f64,
    percent_spread: f64,
}

const INDICES: [IndexSpec; 4] = [
    IndexSpec {
        name: "NIFTY 50",
        base: 21456.78,
        value_spread: 200.0,
        change_spread: 300.0,
        percent_spread: 2.0,
    },
    IndexSpec {
        name: "SENSEX",
        base: 71234.56,
        value_spread: 1000.0,
        change_spread: 500.0,
        percent_spread: 1.5,
    },
    IndexSpec {
        name: "NIFTY BANK",
        base: 46789.12,
        value_spread: 500.0,
        change_spread: 400.0,
        percent_spread: 2.5,
    },
    IndexSpec {
        name: "NIFTY IT",
        base: 34567.89,
        value_spread: 300.0,
        change_spread: 250.0,
        percent_spread: 1.8,
    },
];

/// Stateless generator of synthetic market records.
pub struct QuoteGenerator;

impl QuoteGenerator {
    /// Generate the next `Quote` for `symbol`, starting from `current_price`.
    ///
    /// The move is drawn uniformly from `[-2%, +2%]` and floored at 95% of
    /// `current_price`. `change` and `change_percent` report the drawn move, so
    /// they understate the realized move if the floor ever engages. High and low
    /// are independent one-sided jitters of up to 2% around the new price.
    ///
    /// The caller is expected to store `quote.price` as the symbol's new last price.
    pub fn next_quote<R: Rng>(rng: &mut R, symbol: &str, current_price: f64) -> Quote {
        let change_percent: f64 = rng.random_range(-MAX_CHANGE_PERCENT..=MAX_CHANGE_PERCENT);
        let change = current_price * change_percent / 100.0;
        let new_price = (current_price + change).max(current_price * PRICE_FLOOR_RATIO);

        let high = new_price * (1.0 + rng.random_range(0.0..HIGH_LOW_JITTER));
        let low = new_price * (1.0 - rng.random_range(0.0..HIGH_LOW_JITTER));
        let volume: u64 = rng.random_range(1_000_000..11_000_000);
        let cap_multiplier: u64 = rng.random_range(0..1_000_000_000);
        let market_cap = new_price * cap_multiplier as f64 + 5_000_000_000.0;

        Quote {
            id: symbol.to_lowercase(),
            symbol: symbol.to_string(),
            display_name: catalog::display_name(symbol),
            price: new_price,
            change,
            change_percent,
            high,
            low,
            open: current_price,
            volume,
            market_cap,
            sector: catalog::sector(symbol).to_string(),
        }
    }

    /// Fresh, memoryless snapshot of the four tracked indices.
    pub fn market_indices<R: Rng>(rng: &mut R) -> Vec<MarketIndex> {
        INDICES
            .iter()
            .map(|spec| MarketIndex {
                name: spec.name.to_string(),
                value: spec.base + Self::centered(rng) * spec.value_spread,
                change: Self::centered(rng) * spec.change_spread,
                change_percent: Self::centered(rng) * spec.percent_spread,
            })
            .collect()
    }

    /// Synthesize a historical series of `HISTORY_POINTS` candles ending at `now`.
    ///
    /// Candles are returned oldest first. `current_price` anchors the most recent
    /// close; older closes drift away from it proportionally to their age.
    pub fn historical_series<R: Rng>(
        rng: &mut R,
        current_price: f64,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Vec<Candle> {
        let step = match timeframe {
            Timeframe::Daily => Duration::days(1),
            Timeframe::Intraday => Duration::minutes(5),
        };

        let mut candles: Vec<Candle> = (0..HISTORY_POINTS)
            .map(|i| {
                let drift: f64 = rng.random_range(-0.05..0.05);
                let close = current_price * (1.0 + drift * i as f64 * 0.01);
                Candle {
                    timestamp: now - step * i as i32,
                    open: close * (1.0 + rng.random_range(-0.01_f64..0.01)),
                    high: close * (1.0 + rng.random_range(0.0_f64..0.03)),
                    low: close * (1.0 - rng.random_range(0.0_f64..0.03)),
                    close,
                    volume: rng.random_range(0..10_000_000),
                }
            })
            .collect();
        candles.reverse();
        candles
    }

    /// Uniform draw from `[-0.5, 0.5)`.
    fn centered<R: Rng>(rng: &mut R) -> f64 {
        rng.random::<f64>() - 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn price_never_drops_below_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut price = 2847.65;
        for _ in 0..10_000 {
            let quote = QuoteGenerator::next_quote(&mut rng, "RELIANCE", price);
            assert!(quote.price >= price * PRICE_FLOOR_RATIO);
            assert_eq!(quote.open, price);
            assert!(quote.change_percent.abs() <= MAX_CHANGE_PERCENT);
            price = quote.price;
        }
    }

    #[test]
    fn quote_fields_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let quote = QuoteGenerator::next_quote(&mut rng, "TCS", 3456.78);
            assert!(quote.price <= 3456.78 * 1.02 + 1e-9);
            assert!(quote.high >= quote.price && quote.high < quote.price * 1.02 + 1e-9);
            assert!(quote.low <= quote.price && quote.low > quote.price * 0.98 - 1e-9);
            assert!((1_000_000..11_000_000).contains(&quote.volume));
            assert!(quote.market_cap >= 5_000_000_000.0);
            assert!((quote.change - 3456.78 * quote.change_percent / 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_symbol_gets_fallback_labels() {
        let mut rng = StdRng::seed_from_u64(3);
        let quote = QuoteGenerator::next_quote(&mut rng, "ZOMATO", 1000.0);
        assert_eq!(quote.id, "zomato");
        assert_eq!(quote.display_name, "ZOMATO Limited");
        assert_eq!(quote.sector, "Others");
    }

    #[test]
    fn same_seed_gives_same_quote() {
        let a = QuoteGenerator::next_quote(&mut StdRng::seed_from_u64(42), "ITC", 456.78);
        let b = QuoteGenerator::next_quote(&mut StdRng::seed_from_u64(42), "ITC", 456.78);
        assert_eq!(a, b);
    }

    #[test]
    fn indices_stay_within_spreads() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let indices = QuoteGenerator::market_indices(&mut rng);
            let names: Vec<&str> = indices.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["NIFTY 50", "SENSEX", "NIFTY BANK", "NIFTY IT"]);
            for (index, spec) in indices.iter().zip(INDICES.iter()) {
                assert!((index.value - spec.base).abs() <= spec.value_spread / 2.0);
                assert!(index.change.abs() <= spec.change_spread / 2.0);
                assert!(index.change_percent.abs() <= spec.percent_spread / 2.0);
            }
        }
    }

    #[test]
    fn history_is_oldest_first_and_anchored() {
        let mut rng = StdRng::seed_from_u64(9);
        let now = Utc::now();
        let candles = QuoteGenerator::historical_series(&mut rng, 1523.90, Timeframe::Daily, now);

        assert_eq!(candles.len(), HISTORY_POINTS);
        assert!(candles.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let latest = candles.last().unwrap();
        assert_eq!(latest.timestamp, now);
        assert_eq!(latest.close, 1523.90);
        assert_eq!(candles[0].timestamp, now - Duration::days(29));
        assert!(candles.iter().all(|c| c.high >= c.close && c.low <= c.close));
    }

    #[test]
    fn intraday_history_steps_five_minutes() {
        let mut rng = StdRng::seed_from_u64(10);
        let now = Utc::now();
        let candles = QuoteGenerator::historical_series(&mut rng, 987.32, Timeframe::Intraday, now);
        assert_eq!(candles[1].timestamp - candles[0].timestamp, Duration::minutes(5));
    }
}
