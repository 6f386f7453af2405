//! Feed Watch — a console consumer of the simulated market feed.
//!
//! It builds a `SimulatedFeed` from the command line, subscribes a channel
//! observer to every requested symbol and writes each received quote to stdout
//! as one JSON line. Optionally it logs market indices and top movers on a fixed
//! interval and prints a synthesized history before streaming starts.
//!
//! Usage example (CLI):
//! ```bash
//! feed_watch --symbols RELIANCE,TCS --movers --indices --report-secs 5
//! feed_watch --path ./symbols.txt --tick-min-ms 200 --tick-max-ms 500 --duration-secs 10
//! ```
//!
//! The process stops on Ctrl+C or when `--duration-secs` elapses; both paths
//! unsubscribe every symbol and run the feed's cleanup.
#![warn(missing_docs)]
mod args;
mod symbols;

use crate::args::Args;
use crate::symbols::resolve_symbols;
use clap::Parser;
use crossbeam_channel::{Receiver, after, bounded, never, select, tick, unbounded};
use log::{info, warn};
use market_common::{FeedError, Quote, Result, Timeframe};
use market_feed::{ChannelObserver, SimulatedFeed};
use std::io::{self, Write};
use std::time::Duration;

fn main() -> Result<(), FeedError> {
    init_logger();
    let args = Args::parse();

    let symbols = resolve_symbols(args.symbols.as_deref(), args.path.as_deref())?;
    info!("Symbols: {:?}", symbols);

    let feed = SimulatedFeed::new(args.feed_config())?;
    if let Some(seed) = feed.config().seed {
        info!("Reproducible run with seed {}", seed);
    }

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down watcher...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| FeedError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;

    if let Some(history) = args.history {
        print_history(&feed, &symbols, history.into())?;
    }

    let (quote_tx, quote_rx) = unbounded::<Quote>();
    let observer = ChannelObserver::handle(quote_tx);
    for symbol in &symbols {
        feed.subscribe(symbol, observer.clone());
    }

    let deadline = match args.duration_secs {
        Some(secs) => after(Duration::from_secs(secs)),
        None => never(),
    };
    if args.report_secs == 0 && (args.indices || args.movers) {
        warn!("--report-secs is 0, reports disabled");
    }
    let reports = if args.report_secs > 0 && (args.indices || args.movers) {
        tick(Duration::from_secs(args.report_secs))
    } else {
        never()
    };

    info!("Watcher is running. Press Ctrl+C to exit.");
    let result = watch_loop(&feed, &args, &quote_rx, &shutdown_rx, &deadline, &reports);

    for symbol in &symbols {
        feed.unsubscribe(symbol, &observer);
    }
    feed.cleanup();
    info!("Watcher stopped");
    result
}

/// Stream quotes to stdout until shutdown or deadline.
fn watch_loop(
    feed: &SimulatedFeed,
    args: &Args,
    quote_rx: &Receiver<Quote>,
    shutdown_rx: &Receiver<()>,
    deadline: &Receiver<std::time::Instant>,
    reports: &Receiver<std::time::Instant>,
) -> Result<(), FeedError> {
    let stdout = io::stdout();
    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(deadline) -> _ => {
                info!("Duration elapsed");
                break;
            },
            recv(reports) -> _ => report(feed, args),
            recv(quote_rx) -> msg => match msg {
                Ok(quote) => {
                    let mut out = stdout.lock();
                    writeln!(out, "{}", quote.to_json()?)?;
                },
                Err(e) => {
                    warn!("Quote channel closed: {}", e);
                    break;
                },
            }
        }
    }
    Ok(())
}

fn report(feed: &SimulatedFeed, args: &Args) {
    if args.indices {
        for index in feed.market_indices() {
            info!(
                "INDEX {:<10} {:>10.2} {:>+8.2} ({:+.2}%)",
                index.name, index.value, index.change, index.change_percent
            );
        }
    }
    if args.movers {
        let movers = feed.top_movers();
        for quote in &movers.gainers {
            info!("GAINER {:<10} {:>10.2} {:+.2}%", quote.symbol, quote.price, quote.change_percent);
        }
        for quote in &movers.losers {
            info!("LOSER  {:<10} {:>10.2} {:+.2}%", quote.symbol, quote.price, quote.change_percent);
        }
    }
}

fn print_history(feed: &SimulatedFeed, symbols: &[String], timeframe: Timeframe) -> Result<(), FeedError> {
    let mut out = io::stdout().lock();
    for symbol in symbols {
        let candles = feed.historical_series(symbol, timeframe);
        let json = serde_json::json!({ "symbol": symbol, "timeframe": timeframe, "candles": candles });
        writeln!(out, "{}", json)?;
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
