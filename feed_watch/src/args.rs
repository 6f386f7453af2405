//! Command-line arguments for the feed watcher.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use market_common::Timeframe;
use market_common::defaults::{TICK_MAX_MS, TICK_MIN_MS};
use market_feed::FeedConfig;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Symbols to watch, separated by commas (e.g. `RELIANCE,TCS`).
    #[clap(long)]
    pub symbols: Option<String>,

    /// Path to a text file with symbols to watch.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub path: Option<String>,

    /// Lower bound of the per-symbol tick period, in milliseconds.
    #[clap(long, default_value_t = TICK_MIN_MS)]
    pub tick_min_ms: u64,

    /// Upper bound (exclusive) of the per-symbol tick period, in milliseconds.
    #[clap(long, default_value_t = TICK_MAX_MS)]
    pub tick_max_ms: u64,

    /// Seed for a reproducible price series.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Stop after this many seconds instead of waiting for Ctrl+C.
    #[clap(long)]
    pub duration_secs: Option<u64>,

    /// Interval between index/movers reports, in seconds.
    #[clap(long, default_value_t = 10)]
    pub report_secs: u64,

    /// Log market indices on every report.
    #[clap(long)]
    pub indices: bool,

    /// Log top gainers and losers on every report.
    #[clap(long)]
    pub movers: bool,

    /// Print a synthesized history for every watched symbol before streaming.
    #[clap(long, value_enum)]
    pub history: Option<HistoryArg>,
}

/// CLI spelling of [`Timeframe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryArg {
    /// One candle per day.
    Daily,
    /// One candle per five minutes.
    Intraday,
}

impl From<HistoryArg> for Timeframe {
    fn from(arg: HistoryArg) -> Self {
        match arg {
            HistoryArg::Daily => Timeframe::Daily,
            HistoryArg::Intraday => Timeframe::Intraday,
        }
    }
}

impl Args {
    /// Feed configuration described by these arguments.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            tick_min_ms: self.tick_min_ms,
            tick_max_ms: self.tick_max_ms,
            seed: self.seed,
            ..FeedConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_feed_defaults() {
        let args = Args::try_parse_from(["feed_watch"]).unwrap();
        assert_eq!(args.feed_config(), FeedConfig::default());
        assert_eq!(args.report_secs, 10);
        assert!(!args.indices && !args.movers);
        assert!(args.history.is_none());
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "feed_watch",
            "--symbols",
            "RELIANCE,TCS",
            "--tick-min-ms",
            "100",
            "--tick-max-ms",
            "200",
            "--seed",
            "42",
            "--movers",
            "--history",
            "intraday",
        ])
        .unwrap();
        let config = args.feed_config();
        assert_eq!(config.tick_min_ms, 100);
        assert_eq!(config.tick_max_ms, 200);
        assert_eq!(config.seed, Some(42));
        assert!(args.movers);
        assert_eq!(args.symbols.as_deref(), Some("RELIANCE,TCS"));
        assert_eq!(args.history.map(Timeframe::from), Some(Timeframe::Intraday));
    }
}
