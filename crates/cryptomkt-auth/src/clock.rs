//! Time source for request timestamps

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Source of the current Unix time in seconds
///
/// The server rejects requests whose timestamp falls outside its freshness
/// window, so the dispatcher samples the clock once per private call.
pub trait Clock: Send + Sync {
    /// Current Unix time in whole seconds
    fn unix_seconds(&self) -> u64;

    /// Current Unix time as decimal text, as sent in `X-MKT-TIMESTAMP`
    fn timestamp(&self) -> String {
        self.unix_seconds().to_string()
    }
}

/// Wall clock backed by [`SystemTime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs(),
            Err(e) => {
                warn!("System clock is before the Unix epoch: {}", e);
                0
            }
        }
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}
