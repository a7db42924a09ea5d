//! HTTP client cache keyed by egress path.
//!
//! A `reqwest::Client` binds its proxy at build time, so one client is built
//! per egress config (plus one for direct) and reused for connection pooling.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::RwLock;
use tracing::debug;

use kiteforge_core::{EgressConfig, KiteError};

/// Browser-like user agent sent on every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Transport settings shared by all remote clients.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Lazily built clients, one per egress path.
pub struct HttpClientCache {
    settings: HttpSettings,
    clients: RwLock<HashMap<Option<EgressConfig>, Client>>,
}

impl HttpClientCache {
    pub fn new(settings: HttpSettings) -> Self {
        Self {
            settings,
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    /// Client routed through `egress`, or a direct client for `None`.
    ///
    /// A proxy that cannot be turned into a client is reported as a
    /// transport error so the caller rotates away from it.
    pub async fn client_for(&self, egress: Option<&EgressConfig>) -> Result<Client, KiteError> {
        let key = egress.cloned();
        {
            let clients = self.clients.read().await;
            if let Some(client) = clients.get(&key) {
                return Ok(client.clone());
            }
        }

        let client = self.build(egress)?;
        let mut clients = self.clients.write().await;
        let client = clients.entry(key).or_insert(client).clone();
        Ok(client)
    }

    fn build(&self, egress: Option<&EgressConfig>) -> Result<Client, KiteError> {
        let mut builder = Client::builder()
            .timeout(self.settings.request_timeout)
            .connect_timeout(self.settings.connect_timeout)
            .user_agent(self.settings.user_agent.clone());

        match egress {
            Some(cfg) => {
                let url = cfg
                    .proxy_url()
                    .map_err(|e| KiteError::transport("proxy setup", e))?;
                let proxy = reqwest::Proxy::all(url.as_str())
                    .map_err(|e| KiteError::transport("proxy setup", e))?;
                builder = builder.proxy(proxy);
                debug!(egress = %cfg, "Built proxied HTTP client");
            }
            None => {
                builder = builder.no_proxy();
                debug!("Built direct HTTP client");
            }
        }

        builder
            .build()
            .map_err(|e| KiteError::transport("client setup", e))
    }
}

impl Default for HttpClientCache {
    fn default() -> Self {
        Self::new(HttpSettings::default())
    }
}
