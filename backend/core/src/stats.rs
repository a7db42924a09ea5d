//! Per-session interaction statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters describing one session's history. Never reset by the quota window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    /// Interactions per endpoint name.
    pub endpoint_interactions: BTreeMap<String, u64>,
    pub total_points: u64,
    pub total_interactions: u64,
    pub successful_interactions: u64,
    pub failed_interactions: u64,
    pub last_interaction_at: Option<DateTime<Utc>>,
}

impl SessionStatistics {
    /// Start with a zero counter for every known endpoint.
    pub fn new<I, S>(endpoint_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoint_interactions: endpoint_names
                .into_iter()
                .map(|name| (name.into(), 0))
                .collect(),
            ..Default::default()
        }
    }

    /// Record one interaction attempt. Every call bumps the total, one
    /// endpoint counter, and exactly one of successful/failed.
    pub fn record(&mut self, endpoint_name: &str, success: bool, points: u32, at: DateTime<Utc>) {
        *self
            .endpoint_interactions
            .entry(endpoint_name.to_string())
            .or_insert(0) += 1;
        self.total_interactions += 1;
        self.last_interaction_at = Some(at);
        if success {
            self.successful_interactions += 1;
            self.total_points += u64::from(points);
        } else {
            self.failed_interactions += 1;
        }
    }

    /// Sum of all per-endpoint counters.
    pub fn endpoint_total(&self) -> u64 {
        self.endpoint_interactions.values().sum()
    }
}
