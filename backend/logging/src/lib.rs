//! Telemetry and structured logging for KiteForge.
//!
//! Console plus daily-rolling NDJSON output, credential redaction, and
//! structured per-session event records.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, SessionEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
