//! # Seen-Event Cache
//!
//! Time-bounded record of event ids a consumer has already handled. With it a
//! listener can treat the channel as at-least-once: a redelivered envelope is
//! recognised and skipped instead of triggering a second refresh.
//!
//! - Ids are remembered for `retention` after first sight.
//! - Expired ids are garbage-collected every `gc_interval`, bounding memory.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Time-bounded cache of handled event ids.
pub struct SeenEventCache {
    /// Map of event id -> instant it was first seen.
    seen: HashMap<Uuid, Instant>,

    /// How long an id is remembered.
    retention: Duration,

    /// Last garbage collection instant.
    last_gc: Instant,

    /// Garbage collection interval.
    gc_interval: Duration,
}

impl SeenEventCache {
    /// Default retention: comfortably longer than any redelivery delay.
    pub const DEFAULT_RETENTION: Duration = Duration::from_secs(120);

    /// Default garbage collection interval.
    pub const DEFAULT_GC_INTERVAL: Duration = Duration::from_secs(10);

    /// Create a cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_RETENTION, Self::DEFAULT_GC_INTERVAL)
    }

    /// Create a cache with custom settings.
    #[must_use]
    pub fn with_config(retention: Duration, gc_interval: Duration) -> Self {
        Self {
            seen: HashMap::new(),
            retention,
            last_gc: Instant::now(),
            gc_interval,
        }
    }

    /// Record `event_id` as handled.
    ///
    /// Returns `true` the first time an id is seen and `false` for a duplicate
    /// still inside the retention window.
    pub fn first_sighting(&mut self, event_id: Uuid) -> bool {
        self.first_sighting_at(event_id, Instant::now())
    }

    fn first_sighting_at(&mut self, event_id: Uuid, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_gc) > self.gc_interval {
            self.garbage_collect(now);
            self.last_gc = now;
        }

        match self.seen.get(&event_id) {
            Some(first) if now.saturating_duration_since(*first) <= self.retention => false,
            _ => {
                self.seen.insert(event_id, now);
                true
            }
        }
    }

    /// Check if an id is remembered without recording it.
    #[must_use]
    pub fn contains(&self, event_id: &Uuid) -> bool {
        self.seen.contains_key(event_id)
    }

    /// Get the number of remembered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Remove expired ids from the cache.
    fn garbage_collect(&mut self, now: Instant) {
        let retention = self.retention;
        self.seen
            .retain(|_, first| now.saturating_duration_since(*first) <= retention);
    }
}

impl Default for SeenEventCache {
    fn default() -> Self {
        Self::new()
    }
}
