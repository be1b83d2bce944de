//! Keyed cooldown and burst tracking.
//!
//! Every throttled ability of the routine is one entry in a single
//! [`CooldownTracker`] instead of a dedicated stopwatch field. Time is passed
//! in explicitly as milliseconds from the host [`crate::Clock`], which keeps
//! the tracker deterministic under test.
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

/// Burst bookkeeping: uses within the current window and the window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstState {
    pub count: u32,
    pub cap: u32,
}

/// Timer state of a single ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownTimer {
    pub delay_ms: u64,
    /// Clock reading the elapsed time is measured from.
    origin_ms: u64,
    pub burst: Option<BurstState>,
}

impl CooldownTimer {
    fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.origin_ms)
    }

    fn timer_ready(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) >= self.delay_ms
    }
}

/// Per-ability delays and burst counters.
///
/// Timers start counting when they are registered, so a freshly registered
/// ability with a non-zero delay is not ready until that delay has passed.
#[derive(Clone, Debug)]
pub struct CooldownTracker<K> {
    timers: HashMap<K, CooldownTimer>,
}

impl<K> Default for CooldownTracker<K> {
    fn default() -> Self {
        Self {
            timers: HashMap::new(),
        }
    }
}

impl<K> CooldownTracker<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) a plain delay for `key`.
    pub fn register(&mut self, key: K, delay_ms: u64, now_ms: u64) {
        self.timers.insert(
            key,
            CooldownTimer {
                delay_ms,
                origin_ms: now_ms,
                burst: None,
            },
        );
    }

    /// Registers a burst ability: `cap` uses per window, then `delay_ms` of rest.
    pub fn register_burst(&mut self, key: K, cap: u32, delay_ms: u64, now_ms: u64) {
        self.timers.insert(
            key,
            CooldownTimer {
                delay_ms,
                origin_ms: now_ms,
                burst: Some(BurstState {
                    count: 0,
                    cap: cap.max(1),
                }),
            },
        );
    }

    /// Updates the delay (and burst cap) of `key` without touching its timer.
    pub fn reconfigure(&mut self, key: K, delay_ms: u64, cap: Option<u32>) {
        if let Some(timer) = self.timers.get_mut(&key) {
            timer.delay_ms = delay_ms;
            if let (Some(burst), Some(cap)) = (timer.burst.as_mut(), cap) {
                burst.cap = cap.max(1);
                burst.count = burst.count.min(burst.cap - 1);
            }
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.timers.contains_key(&key)
    }

    pub fn get(&self, key: K) -> Option<&CooldownTimer> {
        self.timers.get(&key)
    }

    /// Milliseconds since the last reset of `key`; zero for unknown keys.
    pub fn elapsed(&self, key: K, now_ms: u64) -> u64 {
        self.timers
            .get(&key)
            .map_or(0, |timer| timer.elapsed(now_ms))
    }

    /// Whether the plain delay of `key` has passed. Unknown keys are ready.
    pub fn ready(&self, key: K, now_ms: u64) -> bool {
        self.timers
            .get(&key)
            .is_none_or(|timer| timer.timer_ready(now_ms))
    }

    /// Restarts the timer of `key`.
    pub fn record_use(&mut self, key: K, now_ms: u64) {
        if let Some(timer) = self.timers.get_mut(&key) {
            timer.origin_ms = now_ms;
            trace!(?key, now_ms, "cooldown restarted");
        }
    }

    /// Whether a burst ability may be used.
    ///
    /// Once a window has been opened (counter above zero) the ability stays
    /// ready until the cap is reached. A closed window waits for the delay.
    pub fn burst_ready(&self, key: K, now_ms: u64) -> bool {
        match self.timers.get(&key) {
            None => true,
            Some(timer) => match timer.burst {
                Some(burst) if burst.count > 0 && burst.count < burst.cap => true,
                _ => timer.timer_ready(now_ms),
            },
        }
    }

    /// Counts one burst attempt. Reaching the cap closes the window: the
    /// counter goes back to zero and the rest delay starts.
    ///
    /// Returns the counter after the update.
    pub fn record_burst(&mut self, key: K, now_ms: u64) -> u32 {
        let Some(timer) = self.timers.get_mut(&key) else {
            return 0;
        };
        let Some(burst) = timer.burst.as_mut() else {
            timer.origin_ms = now_ms;
            return 0;
        };
        burst.count += 1;
        if burst.count >= burst.cap {
            burst.count = 0;
            timer.origin_ms = now_ms;
            trace!(?key, now_ms, "burst window closed");
        }
        burst.count
    }

    /// Current burst counter of `key`.
    pub fn burst_count(&self, key: K) -> u32 {
        self.timers
            .get(&key)
            .and_then(|timer| timer.burst)
            .map_or(0, |burst| burst.count)
    }

    /// Closes an open burst window of `key` without touching its timer.
    pub fn clear_burst(&mut self, key: K) {
        if let Some(burst) = self.timers.get_mut(&key).and_then(|timer| timer.burst.as_mut()) {
            burst.count = 0;
        }
    }

    /// Restarts the timer and clears the burst counter of `key`.
    pub fn reset(&mut self, key: K, now_ms: u64) {
        if let Some(timer) = self.timers.get_mut(&key) {
            timer.origin_ms = now_ms;
            if let Some(burst) = timer.burst.as_mut() {
                burst.count = 0;
            }
        }
    }

    pub fn reset_all(&mut self, now_ms: u64) {
        let keys: Vec<K> = self.timers.keys().copied().collect();
        for key in keys {
            self.reset(key, now_ms);
        }
    }
}
