use thiserror::Error;

/// Top-level error type for the KiteForge runtime.
///
/// Only `StartupConfig` is fatal to the process. `Transport` and
/// `ReportRejected` are absorbed by the session scheduler; `Unexpected`
/// ends the affected session only.
#[derive(Debug, Error)]
pub enum KiteError {
    #[error("startup configuration error: {0}")]
    StartupConfig(String),

    #[error("transport error during {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("usage report rejected with status {status}")]
    ReportRejected { status: u16 },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl KiteError {
    pub fn transport(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Whether this failure is recovered by rotating the egress path.
    pub fn rotates_egress(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Whether the scheduler absorbs this failure and keeps looping.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ReportRejected { .. })
    }
}
