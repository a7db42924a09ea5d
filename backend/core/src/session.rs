//! Per-wallet session state and its rolling quota window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::SessionStatistics;

/// Mutable state of one wallet's scheduling loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub wallet: String,
    /// 1-based position of the wallet in the loaded list.
    pub ordinal: usize,
    /// Points accumulated in the current window.
    pub points: u32,
    pub started_at: DateTime<Utc>,
    pub reset_at: DateTime<Utc>,
    #[serde(with = "window_secs")]
    pub window: Duration,
    pub running: bool,
    pub statistics: SessionStatistics,
}

impl SessionState {
    pub fn new(
        wallet: impl Into<String>,
        ordinal: usize,
        window: Duration,
        now: DateTime<Utc>,
        statistics: SessionStatistics,
    ) -> Self {
        Self {
            wallet: wallet.into(),
            ordinal,
            points: 0,
            started_at: now,
            reset_at: now + window,
            window,
            running: true,
            statistics,
        }
    }

    /// Start a new window if `now` has reached the reset time.
    ///
    /// The next reset is one window after `now`, not after the old reset
    /// time, so a long suspension never triggers several resets in a row.
    pub fn roll_window(&mut self, now: DateTime<Utc>) -> bool {
        if now < self.reset_at {
            return false;
        }
        self.points = 0;
        self.reset_at = now + self.window;
        true
    }

    pub fn cap_reached(&self, daily_cap: u32) -> bool {
        self.points >= daily_cap
    }

    /// Time left until the window resets, or `None` if already due.
    pub fn until_reset(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        (self.reset_at - now).to_std().ok().filter(|d| !d.is_zero())
    }

    pub fn award(&mut self, reward: u32) {
        self.points = self.points.saturating_add(reward);
    }
}

mod window_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        i64::deserialize(d).map(Duration::seconds)
    }
}
