//! Wall-clock source for stroke timestamps.
//!
//! Injected so tests and replays get deterministic timestamps. The
//! default reads the system clock through `web-time`, which falls back to
//! `Date.now()` on WASM.

use web_time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

impl<F: Fn() -> u64> Clock for F {
    fn now_millis(&self) -> u64 {
        self()
    }
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
