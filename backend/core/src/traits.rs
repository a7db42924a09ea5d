use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::egress::EgressConfig;
use crate::error::KiteError;
use crate::types::UsageReport;

/// Streams a chat reply from one endpoint.
///
/// `egress` is the outbound path to use; `None` means direct.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` to `endpoint_url` and return the trimmed assembled reply.
    async fn query(
        &self,
        egress: Option<&EgressConfig>,
        endpoint_url: &str,
        prompt: &str,
    ) -> Result<String, KiteError>;
}

/// Submits completed interactions to the metering endpoint.
#[async_trait]
pub trait UsageReporter: Send + Sync {
    /// `Ok(())` only when the server answered with exactly 200.
    /// Other statuses map to `KiteError::ReportRejected`.
    async fn report(
        &self,
        egress: Option<&EgressConfig>,
        report: &UsageReport,
    ) -> Result<(), KiteError>;
}

/// Fetches recent transaction hashes from a block explorer.
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    async fn recent_hashes(&self, egress: Option<&EgressConfig>) -> Result<Vec<String>, KiteError>;
}

/// Source of randomness for endpoint/prompt selection and cooldown jitter.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform duration in `[min, max)`; returns `min` when the range is empty.
    fn jitter(&mut self, min: Duration, max: Duration) -> Duration;
}

/// Default random source backed by an entropy-seeded `StdRng`.
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn jitter(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
