//! The simulated real-time feed.
//!
//! `SimulatedFeed` owns a per-symbol last-price table, one `TickerTask` per
//! symbol that has at least one observer, and the observer lists themselves.
//! All of it sits behind a single mutex shared with the ticker threads:
//!
//! - `subscribe` registers an observer, starts the symbol's ticker if it is the
//!   first one, and pushes a priming quote to the new observer before returning.
//! - Each tick generates one quote under the lock, snapshots the observer list,
//!   releases the lock and delivers the same quote to every observer in
//!   registration order. Observers may therefore call back into the feed.
//! - `unsubscribe` removes an observer by identity and tears the ticker down
//!   when the list becomes empty.
//! - `cleanup` (also run on drop) stops every ticker.
//!
//! Read-side helpers (`top_movers`, `market_indices`, `historical_series`) never
//! write to the last-price table.

use crate::config::FeedConfig;
use crate::model::movers::rank_movers;
use crate::model::observer::{ObserverHandle, same_observer};
use crate::model::quote_generator::QuoteGenerator;
use crate::ticker_task::TickerTask;
use chrono::Utc;
use log::{debug, error, info, trace};
use market_common::defaults::TOP_MOVERS_LIMIT;
use market_common::{Candle, MarketIndex, Quote, Result, Ticker, Timeframe, TopMovers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use strum::IntoEnumIterator;

/// One observer registered for one symbol.
///
/// Ticks skip a registration until its priming quote has been delivered, so an
/// observer never sees a tick quote ahead of its priming quote.
struct Registration {
    handle: ObserverHandle,
    primed: Arc<AtomicBool>,
}

impl Registration {
    fn new(handle: ObserverHandle) -> Self {
        Self {
            handle,
            primed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn is_primed(&self) -> bool {
        self.primed.load(Ordering::Acquire)
    }
}

/// Everything the feed mutates, guarded by one lock.
struct FeedState {
    last_price: HashMap<String, f64>,
    observers: HashMap<String, Vec<Registration>>,
    tickers: HashMap<String, TickerTask>,
    rng: StdRng,
    next_generation: u64,
}

impl FeedState {
    fn new(config: &FeedConfig) -> Self {
        let last_price = Ticker::iter()
            .map(|t| (t.to_string(), t.baseline_price()))
            .collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            last_price,
            observers: HashMap::new(),
            tickers: HashMap::new(),
            rng,
            next_generation: 0,
        }
    }

    fn current_price(&self, symbol: &str, fallback: f64) -> f64 {
        self.last_price.get(symbol).copied().unwrap_or(fallback)
    }

    /// Generate the next quote for `symbol` and store its price.
    fn advance(&mut self, symbol: &str, fallback: f64) -> Quote {
        let current_price = self.current_price(symbol, fallback);
        let quote = QuoteGenerator::next_quote(&mut self.rng, symbol, current_price);
        self.last_price.insert(symbol.to_string(), quote.price);
        quote
    }

    fn draw_period(&mut self, config: &FeedConfig) -> Duration {
        Duration::from_millis(self.rng.random_range(config.tick_min_ms..config.tick_max_ms))
    }
}

/// State shared between the feed handle and its ticker threads.
struct Shared {
    config: FeedConfig,
    state: Mutex<FeedState>,
}

impl Shared {
    // Poisoning can only come from a panic between two plain-data updates, so
    // the state is still usable.
    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self, symbol: &str, generation: u64) {
        let (quote, observers) = {
            let mut state = self.lock();
            let current = state.tickers.get(symbol).map(TickerTask::generation);
            if current != Some(generation) {
                return;
            }
            let observers: Vec<ObserverHandle> = state
                .observers
                .get(symbol)
                .map(|list| {
                    list.iter()
                        .filter(|r| r.is_primed())
                        .map(|r| Arc::clone(&r.handle))
                        .collect()
                })
                .unwrap_or_default();
            (state.advance(symbol, self.config.fallback_price), observers)
        };

        trace!(
            "Tick {} price={:.2} change={:.2}% -> {} observer(s)",
            quote.symbol,
            quote.price,
            quote.change_percent,
            observers.len()
        );
        for observer in &observers {
            observer.on_quote(&quote);
        }
    }
}

/// Simulated market data feed with push delivery per symbol.
///
/// Construct once at application start with [`SimulatedFeed::new`] and share it
/// (e.g. behind an `Arc`). Dropping the feed stops all ticker threads.
pub struct SimulatedFeed {
    shared: Arc<Shared>,
}

impl SimulatedFeed {
    /// Create a feed with every catalog symbol at its baseline price.
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate()?;
        let state = Mutex::new(FeedState::new(&config));
        info!(
            "Simulated feed initialised: {} catalog symbols, ticks every {}..{}ms",
            Ticker::iter().count(),
            config.tick_min_ms,
            config.tick_max_ms
        );
        Ok(Self {
            shared: Arc::new(Shared { config, state }),
        })
    }

    /// Configuration the feed was built with.
    pub fn config(&self) -> &FeedConfig {
        &self.shared.config
    }

    /// Register `observer` for `symbol` and push it one priming quote.
    ///
    /// The first observer of a symbol starts that symbol's ticker with a period
    /// drawn from the configured range. Unknown symbols are accepted and start
    /// from the fallback price. The priming quote is delivered on the calling
    /// thread before this returns.
    ///
    /// Ticks that fire while the priming quote is being delivered skip the new
    /// observer, so its first quote is always the priming one. Those ticks are
    /// not replayed to it.
    pub fn subscribe(&self, symbol: &str, observer: ObserverHandle) {
        let registration = Registration::new(Arc::clone(&observer));
        let primed = Arc::clone(&registration.primed);
        let (priming, started) = {
            let mut state = self.shared.lock();
            state
                .observers
                .entry(symbol.to_string())
                .or_default()
                .push(registration);

            let started = if state.tickers.contains_key(symbol) {
                None
            } else {
                self.start_ticker(&mut state, symbol)
            };
            (state.advance(symbol, self.shared.config.fallback_price), started)
        };

        match started {
            Some(period) => info!("Started ticker for {} every {:?}", symbol, period),
            None => debug!("Added observer for {}", symbol),
        }
        observer.on_quote(&priming);
        primed.store(true, Ordering::Release);
    }

    /// Remove `observer` from `symbol`.
    ///
    /// Removing the last observer stops the symbol's ticker. Called from outside
    /// the feed's threads this waits for the ticker thread, so nothing more is
    /// delivered for that symbol once it returns. Called from inside an observer
    /// it does not wait (see [`TickerTask::stop`]); a tick already being
    /// delivered may still reach the remaining snapshot. Unknown symbols and
    /// observers are ignored.
    pub fn unsubscribe(&self, symbol: &str, observer: &ObserverHandle) {
        let released = {
            let mut state = self.shared.lock();
            let Some(observers) = state.observers.get_mut(symbol) else {
                return;
            };
            if let Some(pos) = observers.iter().position(|r| same_observer(&r.handle, observer)) {
                observers.remove(pos);
            }
            if !observers.is_empty() {
                return;
            }
            state.observers.remove(symbol);
            state.tickers.remove(symbol)
        };

        if let Some(task) = released {
            task.stop();
            info!("Stopped ticker for {}: no observers left", symbol);
        }
    }

    /// Stop every ticker and forget every observer. Safe to call repeatedly.
    pub fn cleanup(&self) {
        let tasks: Vec<(String, TickerTask)> = {
            let mut state = self.shared.lock();
            state.observers.clear();
            state.tickers.drain().collect()
        };

        if tasks.is_empty() {
            return;
        }
        let count = tasks.len();
        for (symbol, task) in tasks {
            debug!("Stopping ticker for {}", symbol);
            task.stop();
        }
        info!("Feed cleanup stopped {} ticker(s)", count);
    }

    /// Fresh snapshot of the four market indices. Independent between calls.
    pub fn market_indices(&self) -> Vec<MarketIndex> {
        let mut state = self.shared.lock();
        QuoteGenerator::market_indices(&mut state.rng)
    }

    /// Best and worst movers across the catalog.
    ///
    /// Each symbol gets one quote generated from its current last price, but the
    /// results are not written back: calling this does not move the feed.
    pub fn top_movers(&self) -> TopMovers {
        let quotes: Vec<Quote> = {
            let mut state = self.shared.lock();
            let fallback = self.shared.config.fallback_price;
            let mut quotes = Vec::new();
            for ticker in Ticker::iter() {
                let symbol = ticker.as_ref();
                let current_price = state.current_price(symbol, fallback);
                quotes.push(QuoteGenerator::next_quote(&mut state.rng, symbol, current_price));
            }
            quotes
        };
        rank_movers(quotes, TOP_MOVERS_LIMIT)
    }

    /// Locally synthesized history for `symbol`, anchored at its last price.
    pub fn historical_series(&self, symbol: &str, timeframe: Timeframe) -> Vec<Candle> {
        let mut state = self.shared.lock();
        let current_price = state.current_price(symbol, self.shared.config.fallback_price);
        QuoteGenerator::historical_series(&mut state.rng, current_price, timeframe, Utc::now())
    }

    /// Last price of `symbol` (fallback price if it never ticked).
    pub fn last_price(&self, symbol: &str) -> f64 {
        self.shared
            .lock()
            .current_price(symbol, self.shared.config.fallback_price)
    }

    /// Number of observers registered for `symbol`.
    pub fn observer_count(&self, symbol: &str) -> usize {
        self.shared
            .lock()
            .observers
            .get(symbol)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Symbols with a running ticker, sorted.
    pub fn active_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.shared.lock().tickers.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    fn start_ticker(&self, state: &mut FeedState, symbol: &str) -> Option<Duration> {
        let period = state.draw_period(&self.shared.config);
        state.next_generation += 1;
        let generation = state.next_generation;

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let owned_symbol = symbol.to_string();
        let on_tick = move || {
            if let Some(shared) = weak.upgrade() {
                shared.tick(&owned_symbol, generation);
            }
        };

        match TickerTask::start(symbol, period, generation, on_tick) {
            Ok(task) => {
                let period = task.period();
                state.tickers.insert(symbol.to_string(), task);
                Some(period)
            }
            Err(e) => {
                error!("Failed to start ticker for {}: {}", symbol, e);
                None
            }
        }
    }
}

impl Drop for SimulatedFeed {
    fn drop(&mut self) {
        self.cleanup();
    }
}
