//! Simulated real-time market data feed.
//!
//! The feed keeps a last-price table for a fixed catalog of symbols, runs one
//! ticker thread per subscribed symbol and pushes freshly generated quotes to
//! registered observers. It wires together:
//!
//! - `SimulatedFeed` — the context object holding state, tickers and observers.
//! - `TickerTask` — a cancellable periodic thread driven by crossbeam `tick`.
//! - `QuoteGenerator` — the pure random-walk quote synthesis.
//! - `QuoteObserver` — the delivery seam; closures and `ChannelObserver` implement it.
//!
//! ```no_run
//! use market_feed::{FeedConfig, SimulatedFeed, observer};
//!
//! let feed = SimulatedFeed::new(FeedConfig::default())?;
//! let handle = observer(|quote| println!("{} {:.2}", quote.symbol, quote.price));
//! feed.subscribe("RELIANCE", handle.clone());
//! // ...
//! feed.unsubscribe("RELIANCE", &handle);
//! # Ok::<(), market_common::FeedError>(())
//! ```
#![warn(missing_docs)]

pub mod config;
pub mod feed;
pub mod model;
pub mod ticker_task;

pub use config::FeedConfig;
pub use feed::SimulatedFeed;
pub use model::observer::{ChannelObserver, ObserverHandle, QuoteObserver, observer};
pub use model::quote_generator::QuoteGenerator;
pub use ticker_task::TickerTask;
