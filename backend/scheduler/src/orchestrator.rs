//! Fans out one session per wallet and supervises them until stopped.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};

use kiteforge_core::{short_wallet, EgressConfig, EntropyRandom, SessionState};

use crate::egress::EgressSelector;
use crate::session::{Remotes, SessionScheduler, SessionSettings};

/// Outcome counts once every session has returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub faulted: usize,
    pub panicked: usize,
    pub total_points: u64,
    pub total_interactions: u64,
}

pub struct Orchestrator {
    wallets: Vec<String>,
    proxies: Arc<Vec<EgressConfig>>,
    settings: SessionSettings,
    remotes: Remotes,
    seed: Option<u64>,
}

impl Orchestrator {
    pub fn new(
        wallets: Vec<String>,
        proxies: Vec<EgressConfig>,
        settings: SessionSettings,
        remotes: Remotes,
    ) -> Self {
        Self {
            wallets,
            proxies: Arc::new(proxies),
            settings,
            remotes,
            seed: None,
        }
    }

    /// Seed every session's random source deterministically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn session(&self, wallet: &str, ordinal: usize) -> SessionScheduler {
        let scheduler = SessionScheduler::new(
            wallet,
            ordinal,
            self.settings,
            EgressSelector::new(Arc::clone(&self.proxies)),
            self.remotes.clone(),
        );
        match self.seed {
            Some(seed) => scheduler.with_rng(Box::new(EntropyRandom::seeded(
                seed.wrapping_add(ordinal as u64),
            ))),
            None => scheduler,
        }
    }

    /// Start every session and wait for all of them to return.
    ///
    /// Sessions only return after `stop` is raised or on a fault; a faulted
    /// or panicked session is logged and does not affect the others.
    pub async fn run(self, stop: watch::Receiver<bool>) -> RunSummary {
        info!(
            wallets = self.wallets.len(),
            proxies = self.proxies.len(),
            endpoints = self.remotes.registry.len(),
            "Starting sessions"
        );

        let mut set = JoinSet::new();
        for (i, wallet) in self.wallets.iter().enumerate() {
            let session = self.session(wallet, i + 1);
            set.spawn(session.run(stop.clone()));
        }

        let mut summary = RunSummary::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(state)) => {
                    summary.completed += 1;
                    summary.absorb(&state);
                }
                Ok(Err(e)) => {
                    summary.faulted += 1;
                    error!(error = %e, "Session ended with a fault");
                }
                Err(e) => {
                    summary.panicked += 1;
                    error!(error = %e, "Session task panicked");
                }
            }
        }

        info!(
            completed = summary.completed,
            faulted = summary.faulted,
            panicked = summary.panicked,
            total_points = summary.total_points,
            total_interactions = summary.total_interactions,
            "All sessions finished"
        );
        summary
    }
}

impl RunSummary {
    fn absorb(&mut self, state: &SessionState) {
        self.total_points += state.statistics.total_points;
        self.total_interactions += state.statistics.total_interactions;
        info!(
            session = state.ordinal,
            wallet = %short_wallet(&state.wallet),
            points = state.points,
            total_points = state.statistics.total_points,
            interactions = state.statistics.total_interactions,
            "Session summary"
        );
    }
}
