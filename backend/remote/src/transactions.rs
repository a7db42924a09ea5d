use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use kiteforge_core::{EgressConfig, KiteError, TransactionFeed};

use crate::http::HttpClientCache;

/// Explorer endpoint used when no override is configured.
pub const DEFAULT_TRANSACTION_FEED_URL: &str =
    "https://testnet.kitescan.ai/api/v2/advanced-filters";

#[derive(Deserialize)]
struct FeedPage {
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[derive(Deserialize)]
struct FeedItem {
    #[serde(default)]
    hash: Option<String>,
}

/// Block-explorer client listing recent transfer transactions.
pub struct ExplorerTransactionFeed {
    http: Arc<HttpClientCache>,
    url: String,
    transaction_types: String,
    age: String,
}

impl ExplorerTransactionFeed {
    pub fn new(http: Arc<HttpClientCache>) -> Self {
        Self {
            http,
            url: DEFAULT_TRANSACTION_FEED_URL.to_string(),
            transaction_types: "coin_transfer".to_string(),
            age: "5m".to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Transaction type filter and trailing window, e.g. `coin_transfer` / `5m`.
    pub fn with_filter(mut self, transaction_types: impl Into<String>, age: impl Into<String>) -> Self {
        self.transaction_types = transaction_types.into();
        self.age = age.into();
        self
    }
}

#[async_trait]
impl TransactionFeed for ExplorerTransactionFeed {
    async fn recent_hashes(&self, egress: Option<&EgressConfig>) -> Result<Vec<String>, KiteError> {
        let client = self.http.client_for(egress).await?;

        let response = client
            .get(&self.url)
            .header("Accept", "*/*")
            .query(&[
                ("transaction_types", self.transaction_types.as_str()),
                ("age", self.age.as_str()),
            ])
            .send()
            .await
            .map_err(|e| KiteError::transport("transaction fetch", e))?;

        let page: FeedPage = response
            .json()
            .await
            .map_err(|e| KiteError::transport("transaction fetch", e))?;

        let hashes: Vec<String> = page.items.into_iter().filter_map(|item| item.hash).collect();
        debug!(count = hashes.len(), "Fetched recent transactions");
        Ok(hashes)
    }
}
