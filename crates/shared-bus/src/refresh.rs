//! # Refresh Signal
//!
//! What an open view waits on: the next matching bus event, or the poll
//! interval elapsing, whichever comes first. Polling makes a missed or lagged
//! broadcast harmless; the view converges within one interval.

use crate::events::EventEnvelope;
use crate::seen_cache::SeenEventCache;
use crate::subscriber::Subscription;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Why a view should re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshReason {
    /// A matching event arrived.
    Event(EventEnvelope),
    /// The poll interval elapsed.
    Poll,
}

/// Combined event/poll trigger for one open view.
pub struct RefreshSignal {
    subscription: Subscription,
    ticker: Interval,
    seen: SeenEventCache,
    bus_closed: bool,
}

impl RefreshSignal {
    /// Create a signal from a subscription and a poll interval.
    ///
    /// The first poll tick fires one full interval after creation.
    #[must_use]
    pub fn new(subscription: Subscription, poll_interval: Duration) -> Self {
        let period = poll_interval.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            subscription,
            ticker,
            seen: SeenEventCache::new(),
            bus_closed: false,
        }
    }

    /// Remember handled event ids for `window` instead of the default.
    #[must_use]
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.seen = SeenEventCache::with_config(window, SeenEventCache::DEFAULT_GC_INTERVAL.min(window));
        self
    }

    /// Wait for the next reason to refresh.
    ///
    /// Duplicate deliveries of the same event id are skipped. If the bus is
    /// dropped the signal degrades to polling only.
    pub async fn next(&mut self) -> RefreshReason {
        loop {
            if self.bus_closed {
                self.ticker.tick().await;
                return RefreshReason::Poll;
            }

            tokio::select! {
                received = self.subscription.recv() => match received {
                    Some(envelope) => {
                        if self.seen.first_sighting(envelope.event_id) {
                            return RefreshReason::Event(envelope);
                        }
                        debug!(event_id = %envelope.event_id, "Duplicate event skipped");
                    }
                    None => {
                        debug!("Event bus closed, falling back to polling");
                        self.bus_closed = true;
                    }
                },
                _ = self.ticker.tick() => return RefreshReason::Poll,
            }
        }
    }

    /// Whether the underlying bus has gone away.
    #[must_use]
    pub fn is_polling_only(&self) -> bool {
        self.bus_closed
    }
}
