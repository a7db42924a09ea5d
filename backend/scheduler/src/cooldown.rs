//! Cooldown jitter and stop-aware suspension.
//!
//! Every suspension in a session (cooldown between interactions, waiting
//! for the quota window to reset) goes through [`pause`] so the stop signal
//! can cut it short.

use std::time::Duration;

use tokio::sync::watch;

use kiteforge_core::RandomSource;

/// Inclusive lower / exclusive upper bound of the cooldown between interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownRange {
    pub min: Duration,
    pub max: Duration,
}

impl Default for CooldownRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1_000),
            max: Duration::from_millis(3_000),
        }
    }
}

impl CooldownRange {
    pub fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    /// Draw a delay uniformly from the range.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> Duration {
        rng.jitter(self.min, self.max)
    }
}

/// How a [`pause`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Elapsed,
    Stopped,
}

/// Sleep for `duration` unless the stop flag is raised first.
///
/// A dropped stop sender counts as a stop request.
pub async fn pause(duration: Duration, stop: &mut watch::Receiver<bool>) -> Pause {
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);

    loop {
        if *stop.borrow_and_update() {
            return Pause::Stopped;
        }
        tokio::select! {
            _ = &mut sleep => return Pause::Elapsed,
            changed = stop.changed() => {
                if changed.is_err() {
                    return Pause::Stopped;
                }
            }
        }
    }
}
