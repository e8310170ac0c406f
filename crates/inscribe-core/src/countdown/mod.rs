//! Confirmation-window countdown derived from wall-clock time.
//!
//! A pending inscription may be confirmed for a bounded window (30 minutes by
//! default) starting from the moment the confirmation flow first observes it.
//! Remaining time is always recomputed from the persisted start timestamp and
//! the current clock reading — never maintained by decrementing a counter —
//! so it stays correct after process suspension or restart.
//!
//! # Components
//!
//! - [`remaining_secs`]: the pure derivation
//!   `max(0, window - (now - started_at))`.
//! - [`Countdown`]: a start timestamp paired with its window.
//! - [`CountdownTicker`]: a 1 Hz pull-based tick stream ending in a single
//!   terminal [`Tick::Expired`]. Dropping the ticker stops it; no tick is
//!   observed afterwards.

mod clock;


use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};

/// Default confirmation window (30 minutes).
///
/// The server enforces its own expiry independently; the local window is
/// advisory, so it only needs to match the server's horizon, not prove it.
pub const DEFAULT_CONFIRMATION_WINDOW_SECS: u64 = 30 * 60;

/// Seconds left in the window at `now_ms`, saturating at zero.
///
/// Sub-second remainders are truncated, so the result drops to 0 exactly at
/// `started_at_ms + window_secs * 1000`.
#[must_use]
pub fn remaining_secs(now_ms: u64, started_at_ms: u64, window_secs: u64) -> u64 {
    let elapsed_secs = now_ms.saturating_sub(started_at_ms) / 1000;
    window_secs.saturating_sub(elapsed_secs)
}

/// A confirmation window anchored to its persisted start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at_ms: u64,
    window_secs: u64,
}

impl Countdown {
    /// Creates a countdown from a start timestamp and window length.
    #[must_use]
    pub const fn new(started_at_ms: u64, window_secs: u64) -> Self {
        Self {
            started_at_ms,
            window_secs,
        }
    }

    /// The persisted start timestamp in epoch milliseconds.
    #[must_use]
    pub const fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// The window length in seconds.
    #[must_use]
    pub const fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// Seconds left at the given instant.
    #[must_use]
    pub fn remaining_secs_at(&self, now_ms: u64) -> u64 {
        remaining_secs(now_ms, self.started_at_ms, self.window_secs)
    }

    /// Whether the window has lapsed at the given instant.
    #[must_use]
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.remaining_secs_at(now_ms) == 0
    }
}

/// One observation from the countdown stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Seconds left in the window; strictly positive.
    Remaining(u64),
    /// The window has lapsed. Emitted exactly once, then the stream ends.
    Expired,
}

/// 1 Hz pull-based countdown stream.
///
/// Each call to [`Self::tick`] waits for the next interval slot, recomputes
/// the remaining time from the injected clock, and yields it. Once
/// [`Tick::Expired`] has been yielded the stream is exhausted and every
/// further call returns `None`.
#[derive(Debug)]
pub struct CountdownTicker {
    countdown: Countdown,
    clock: Arc<dyn Clock>,
    interval: Interval,
    finished: bool,
}

impl CountdownTicker {
    /// Creates a ticker for the given countdown.
    ///
    /// The first tick fires immediately so callers can render the current
    /// remaining time without waiting a second.
    #[must_use]
    pub fn new(countdown: Countdown, clock: Arc<dyn Clock>) -> Self {
        let mut interval = interval(Duration::from_secs(1));
        // Remaining time is recomputed from the clock on every tick, so
        // catching up on missed slots would only emit redundant readings.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            countdown,
            clock,
            interval,
            finished: false,
        }
    }

    /// Waits for the next tick. Returns `None` once the stream is exhausted.
    pub async fn tick(&mut self) -> Option<Tick> {
        if self.finished {
            return None;
        }
        self.interval.tick().await;
        let remaining = self.countdown.remaining_secs_at(self.clock.now_ms());
        if remaining == 0 {
            self.finished = true;
            Some(Tick::Expired)
        } else {
            Some(Tick::Remaining(remaining))
        }
    }
}
