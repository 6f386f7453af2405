//! Cancellable periodic task backing one subscribed symbol.
//!
//! Each task owns a background thread that waits on a crossbeam `tick` channel
//! and a stop channel. Closing the stop channel (dropping the task, or calling
//! [`TickerTask::stop`]) ends the loop before the next tick fires.

use crossbeam_channel::{Sender, bounded, select, tick};
use log::debug;
use std::cell::Cell;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

thread_local! {
    static ON_TICKER_THREAD: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is running some `TickerTask`.
pub fn on_ticker_thread() -> bool {
    ON_TICKER_THREAD.with(Cell::get)
}

/// Handle to a running ticker thread.
pub struct TickerTask {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
    period: Duration,
    generation: u64,
}

impl TickerTask {
    /// Spawn a thread named `feed-<name>` that calls `on_tick` every `period`
    /// until stopped.
    ///
    /// `generation` tags the task so that a tick racing with a stop can be told
    /// apart from a tick of a newer task for the same symbol.
    pub fn start<F>(name: &str, period: Duration, generation: u64, on_tick: F) -> io::Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let handle = thread::Builder::new()
            .name(format!("feed-{}", name))
            .spawn(move || {
                ON_TICKER_THREAD.with(|flag| flag.set(true));
                let ticks = tick(period);
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticks) -> _ => on_tick(),
                    }
                }
                debug!("Ticker thread {:?} exiting", thread::current().name());
            })?;

        Ok(Self {
            stop_tx,
            handle,
            period,
            generation,
        })
    }

    /// Interval between two ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tag given at start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the task and wait for its thread to exit.
    ///
    /// When called from any ticker thread (an observer unsubscribing during a
    /// tick, from its own symbol or another one) the join is skipped and the
    /// thread is detached: two tickers stopping each other would otherwise wait
    /// on one another forever. The loop still exits once its current tick
    /// returns.
    pub fn stop(self) {
        let TickerTask {
            stop_tx, handle, ..
        } = self;
        drop(stop_tx);
        if on_ticker_thread() {
            return;
        }
        if handle.join().is_err() {
            debug!("Ticker thread panicked before shutdown");
        }
    }
}
