//! Session Event Logger
//!
//! Structured session lifecycle and interaction events, written through
//! `tracing` so they land in the rolling NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Started {
        daily_cap: u32,
        daily_target: u32,
        reset_at: DateTime<Utc>,
        egress: String,
    },
    Interaction {
        number: u64,
        endpoint: String,
        agent_id: String,
        query: String,
        success: bool,
        points: u32,
    },
    QuotaReached {
        points: u32,
        reset_at: DateTime<Utc>,
    },
    WindowReset {
        reset_at: DateTime<Utc>,
    },
    Failure {
        operation: String,
        error: String,
    },
    Stopped {
        total_interactions: u64,
        successful_interactions: u64,
        failed_interactions: u64,
        total_points: u64,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session: usize,
    pub wallet: String,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

impl EventLogEntry {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"serialize_error\":\"{e}\"}}"))
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Build the redacted log entry for one event.
    pub fn entry(session: usize, wallet: &str, mut event: SessionEvent) -> EventLogEntry {
        match &mut event {
            SessionEvent::Started { egress, .. } => {
                *egress = redact_sensitive_data(egress);
            }
            SessionEvent::Interaction { query, .. } => {
                *query = redact_sensitive_data(query);
            }
            SessionEvent::Failure { error, .. } => {
                *error = redact_sensitive_data(error);
            }
            _ => {}
        }

        EventLogEntry {
            session,
            wallet: wallet.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// Log a session event on the `session_events` target.
    pub fn log_event(session: usize, wallet: &str, event: SessionEvent) {
        let entry = Self::entry(session, wallet, event);
        info!(target: "session_events", session, event = %entry.to_json(), "Session event");
    }
}
