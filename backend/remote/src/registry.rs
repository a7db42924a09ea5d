//! Endpoint registry shared by every session.
//!
//! All endpoints are fixed at startup except the prompt pool of the
//! recent-transactions endpoint, which every session overwrites once per
//! cycle. Writes replace the whole pool (last writer wins) and reads take a
//! snapshot, so a session may select from a pool written by another session
//! or find it empty. The lock is held only for the pointer swap.

use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use tracing::debug;

use kiteforge_core::{EndpointSpec, KiteError, PromptSource, RandomSource};

struct Entry {
    spec: EndpointSpec,
    prompts: Arc<Vec<String>>,
}

/// The endpoint/prompt pair chosen for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub url: String,
    pub agent_id: String,
    pub prompt: String,
}

/// Catalog of chat endpoints with one live-refreshed prompt slot.
pub struct EndpointRegistry {
    entries: Vec<Entry>,
    analysis: Option<usize>,
    analysis_prompts: RwLock<Arc<Vec<String>>>,
}

impl EndpointRegistry {
    /// Build from a catalog. The first recent-transactions endpoint owns the
    /// live slot; its configured prompts seed the slot.
    pub fn new(endpoints: Vec<EndpointSpec>) -> Self {
        let analysis = endpoints
            .iter()
            .position(|e| e.prompt_source == PromptSource::RecentTransactions);

        let mut seed = Vec::new();
        let entries = endpoints
            .into_iter()
            .enumerate()
            .map(|(i, mut spec)| {
                let prompts = std::mem::take(&mut spec.prompts);
                if Some(i) == analysis {
                    seed = prompts;
                    Entry {
                        spec,
                        prompts: Arc::new(Vec::new()),
                    }
                } else {
                    Entry {
                        spec,
                        prompts: Arc::new(prompts),
                    }
                }
            })
            .collect();

        Self {
            entries,
            analysis,
            analysis_prompts: RwLock::new(Arc::new(seed)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in catalog order.
    pub fn endpoint_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.spec.name.clone()).collect()
    }

    pub fn has_analysis_endpoint(&self) -> bool {
        self.analysis.is_some()
    }

    /// Replace the live prompt pool wholesale.
    pub fn replace_analysis_prompts(&self, prompts: Vec<String>) -> Result<(), KiteError> {
        if self.analysis.is_none() {
            return Ok(());
        }
        let mut slot = self
            .analysis_prompts
            .write()
            .map_err(|_| KiteError::Unexpected(anyhow!("endpoint registry lock poisoned")))?;
        *slot = Arc::new(prompts);
        Ok(())
    }

    /// Current contents of the live prompt pool.
    pub fn analysis_prompts(&self) -> Result<Arc<Vec<String>>, KiteError> {
        self.analysis_prompts
            .read()
            .map(|slot| Arc::clone(&slot))
            .map_err(|_| KiteError::Unexpected(anyhow!("endpoint registry lock poisoned")))
    }

    /// Pick an endpoint uniformly among those whose pool is non-empty, then a
    /// prompt uniformly from that pool. `None` when every pool is empty.
    pub fn select(&self, rng: &mut dyn RandomSource) -> Result<Option<Selection>, KiteError> {
        let live = self.analysis_prompts()?;
        let candidates: Vec<(&EndpointSpec, &Arc<Vec<String>>)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let pool = if Some(i) == self.analysis { &live } else { &entry.prompts };
                (&entry.spec, pool)
            })
            .filter(|(_, pool)| !pool.is_empty())
            .collect();

        if candidates.is_empty() {
            return Ok(None);
        }

        let (spec, pool) = candidates[rng.pick(candidates.len())];
        let prompt = pool[rng.pick(pool.len())].clone();
        debug!(endpoint = %spec.name, candidates = candidates.len(), "Selected endpoint");

        Ok(Some(Selection {
            name: spec.name.clone(),
            url: spec.url.clone(),
            agent_id: spec.agent_id.clone(),
            prompt,
        }))
    }
}
