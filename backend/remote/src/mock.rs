//! Scripted in-memory remote clients for tests and dry runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use kiteforge_core::{
    ChatClient, EgressConfig, KiteError, TransactionFeed, UsageReport, UsageReporter,
};

/// Scripted response of a mock call. When the script runs out the
/// fallback outcome is repeated.
#[derive(Debug, Clone)]
pub enum MockOutcome<T> {
    Ok(T),
    Transport,
    Rejected(u16),
    /// An internal fault that should end the calling session.
    Fault,
}

impl<T: Clone> MockOutcome<T> {
    fn resolve(&self, operation: &str) -> Result<T, KiteError> {
        match self {
            Self::Ok(v) => Ok(v.clone()),
            Self::Transport => Err(KiteError::transport(operation, "scripted failure")),
            Self::Rejected(status) => Err(KiteError::ReportRejected { status: *status }),
            Self::Fault => Err(KiteError::Unexpected(anyhow!("scripted fault in {operation}"))),
        }
    }
}

struct Script<T> {
    queue: Mutex<VecDeque<MockOutcome<T>>>,
    fallback: MockOutcome<T>,
}

impl<T: Clone> Script<T> {
    fn new(fallback: MockOutcome<T>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    fn push(&self, outcome: MockOutcome<T>) {
        if let Ok(mut q) = self.queue.lock() {
            q.push_back(outcome);
        }
    }

    fn next(&self, operation: &str) -> Result<T, KiteError> {
        let scripted = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        scripted.unwrap_or_else(|| self.fallback.clone()).resolve(operation)
    }
}

/// One recorded remote call: which egress it went through and its subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub egress: Option<EgressConfig>,
    pub subject: String,
}

fn record(log: &Mutex<Vec<RecordedCall>>, egress: Option<&EgressConfig>, subject: &str) {
    if let Ok(mut calls) = log.lock() {
        calls.push(RecordedCall {
            egress: egress.cloned(),
            subject: subject.to_string(),
        });
    }
}

fn snapshot(log: &Mutex<Vec<RecordedCall>>) -> Vec<RecordedCall> {
    log.lock().map(|c| c.clone()).unwrap_or_default()
}

/// Chat client answering with a canned reply.
pub struct MockChatClient {
    script: Script<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChatClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            script: Script::new(MockOutcome::Ok(reply.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, outcome: MockOutcome<String>) -> Self {
        self.script.push(outcome);
        self
    }

    /// Recorded calls; `subject` is the endpoint URL.
    pub fn calls(&self) -> Vec<RecordedCall> {
        snapshot(&self.calls)
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn query(
        &self,
        egress: Option<&EgressConfig>,
        endpoint_url: &str,
        _prompt: &str,
    ) -> Result<String, KiteError> {
        record(&self.calls, egress, endpoint_url);
        self.script.next("chat query")
    }
}

/// Usage reporter accepting or rejecting per script.
pub struct MockUsageReporter {
    script: Script<()>,
    calls: Mutex<Vec<RecordedCall>>,
    reports: Mutex<Vec<UsageReport>>,
}

impl MockUsageReporter {
    pub fn accepting() -> Self {
        Self::with_fallback(MockOutcome::Ok(()))
    }

    pub fn rejecting(status: u16) -> Self {
        Self::with_fallback(MockOutcome::Rejected(status))
    }

    pub fn with_fallback(fallback: MockOutcome<()>) -> Self {
        Self {
            script: Script::new(fallback),
            calls: Mutex::new(Vec::new()),
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, outcome: MockOutcome<()>) -> Self {
        self.script.push(outcome);
        self
    }

    /// Recorded calls; `subject` is the agent id.
    pub fn calls(&self) -> Vec<RecordedCall> {
        snapshot(&self.calls)
    }

    pub fn reports(&self) -> Vec<UsageReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl UsageReporter for MockUsageReporter {
    async fn report(
        &self,
        egress: Option<&EgressConfig>,
        report: &UsageReport,
    ) -> Result<(), KiteError> {
        record(&self.calls, egress, &report.agent_id);
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report.clone());
        }
        self.script.next("usage report")
    }
}

/// Transaction feed returning canned hashes.
pub struct MockTransactionFeed {
    script: Script<Vec<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransactionFeed {
    pub fn new<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Script::new(MockOutcome::Ok(hashes.into_iter().map(Into::into).collect())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            script: Script::new(MockOutcome::Transport),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, outcome: MockOutcome<Vec<String>>) -> Self {
        self.script.push(outcome);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        snapshot(&self.calls)
    }
}

#[async_trait]
impl TransactionFeed for MockTransactionFeed {
    async fn recent_hashes(&self, egress: Option<&EgressConfig>) -> Result<Vec<String>, KiteError> {
        record(&self.calls, egress, "recent_hashes");
        self.script.next("transaction fetch")
    }
}
