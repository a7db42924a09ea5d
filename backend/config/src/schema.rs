//! KiteForge runtime configuration schema.
//!
//! Every field is optional in the YAML file; `defaults::apply_all_defaults`
//! fills the gaps after load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use kiteforge_core::EndpointSpec;

/// Root configuration for KiteForge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KiteForgeConfig {
    /// Wallet list file, one address per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallets: Option<PathBuf>,

    /// Proxy list file. Missing file means direct connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Endpoint catalog; the built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointSpec>>,
}

/// Quota and pacing of every session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_point_cap: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_per_interaction: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_min_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_max_ms: Option<u64>,
}

/// HTTP behaviour and remote service locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_report_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_feed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_types: Option<String>,
    /// Explorer age filter, e.g. `5m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_age: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `kiteforge_scheduler=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiteforge_core::PromptSource;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
wallets: data/wallets.txt
session:
  dailyPointCap: 100
  pointsPerInteraction: 10
  cooldownMinMs: 500
network:
  requestTimeoutSecs: 30
  transactionAge: 10m
endpoints:
  - url: https://agent.example/main
    agentId: deployment_1
    name: Analyzer
    promptSource: recent_transactions
"#;
        let config: KiteForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.wallets, Some(PathBuf::from("data/wallets.txt")));
        let session = config.session.unwrap();
        assert_eq!(session.daily_point_cap, Some(100));
        assert_eq!(session.cooldown_min_ms, Some(500));
        assert_eq!(session.cooldown_max_ms, None);
        assert_eq!(config.network.unwrap().transaction_age.as_deref(), Some("10m"));
        let endpoints = config.endpoints.unwrap();
        assert_eq!(endpoints[0].prompt_source, PromptSource::RecentTransactions);
        assert!(endpoints[0].prompts.is_empty());
    }

    #[test]
    fn empty_document_is_default() {
        let config: KiteForgeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, KiteForgeConfig::default());
    }
}
