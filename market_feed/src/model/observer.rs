//! Observer seam between the feed and whatever consumes its quotes.
//!
//! Observers are registered as `ObserverHandle`s (`Arc<dyn QuoteObserver>`) and
//! identified by pointer: unsubscribing requires the same handle that was
//! subscribed, not an equal-looking closure.

use crossbeam_channel::Sender;
use log::debug;
use market_common::Quote;
use std::sync::Arc;

/// Sink for quotes delivered by the feed.
///
/// Called on the feed's ticker threads (and on the subscribing thread for the
/// priming quote). Implementations should return quickly; the next observer of
/// the same tick waits for this one.
///
/// Observers may call back into the feed. An unsubscribe or cleanup issued from
/// inside `on_quote` does not wait for the affected ticker threads to finish, so
/// a tick those threads are already delivering can still arrive afterwards.
pub trait QuoteObserver: Send + Sync {
    /// Receive one quote. The reference is only valid for the duration of the call.
    fn on_quote(&self, quote: &Quote);
}

impl<F> QuoteObserver for F
where
    F: Fn(&Quote) + Send + Sync,
{
    fn on_quote(&self, quote: &Quote) {
        self(quote)
    }
}

/// Shared, identity-comparable observer handle.
pub type ObserverHandle = Arc<dyn QuoteObserver>;

/// Wrap a closure into an `ObserverHandle`.
pub fn observer<F>(callback: F) -> ObserverHandle
where
    F: Fn(&Quote) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Pointer identity of two handles, ignoring vtable metadata.
pub fn same_observer(a: &ObserverHandle, b: &ObserverHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Forwards every quote into a crossbeam channel.
///
/// Lets a consumer pull quotes from its own thread with `select!` instead of
/// running code on the feed's threads. Send failures (receiver dropped) are
/// logged and otherwise ignored; the observer stays registered until the
/// owner unsubscribes it.
pub struct ChannelObserver {
    tx: Sender<Quote>,
}

impl ChannelObserver {
    /// Create a handle forwarding into `tx`.
    pub fn handle(tx: Sender<Quote>) -> ObserverHandle {
        Arc::new(ChannelObserver { tx })
    }
}

impl QuoteObserver for ChannelObserver {
    fn on_quote(&self, quote: &Quote) {
        if let Err(e) = self.tx.send(quote.clone()) {
            debug!("Dropping quote for {}: {}", quote.symbol, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_quote() -> Quote {
        Quote {
            id: "infy".into(),
            symbol: "INFY".into(),
            display_name: "Infosys Limited".into(),
            price: 1530.0,
            change: 6.1,
            change_percent: 0.4,
            high: 1540.0,
            low: 1520.0,
            open: 1523.9,
            volume: 2_000_000,
            market_cap: 6e9,
            sector: "Information Technology".into(),
        }
    }

    #[test]
    fn closures_are_observers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = observer(move |_quote: &Quote| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.on_quote(&sample_quote());
        handle.on_quote(&sample_quote());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn identity_is_by_handle_not_by_behaviour() {
        let a = observer(|_quote: &Quote| {});
        let b = observer(|_quote: &Quote| {});
        let a_again = Arc::clone(&a);
        assert!(same_observer(&a, &a_again));
        assert!(!same_observer(&a, &b));
    }

    #[test]
    fn channel_observer_forwards_and_survives_dropped_receiver() {
        let (tx, rx) = unbounded();
        let handle = ChannelObserver::handle(tx);
        handle.on_quote(&sample_quote());
        assert_eq!(rx.try_recv().unwrap().symbol, "INFY");

        drop(rx);
        handle.on_quote(&sample_quote());
    }
}
