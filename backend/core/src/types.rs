use serde::{Deserialize, Serialize};

/// Where an endpoint's prompts come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    /// Fixed prompt list shipped with the catalog.
    #[default]
    Static,
    /// Rebuilt every cycle from recently observed transaction hashes.
    RecentTransactions,
}

/// Definition of a remote chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSpec {
    /// URL the chat query is POSTed to.
    pub url: String,
    /// Opaque agent id echoed to the usage reporter.
    pub agent_id: String,
    /// Human-readable name; statistics are keyed by it.
    pub name: String,
    #[serde(default)]
    pub prompt_source: PromptSource,
    #[serde(default)]
    pub prompts: Vec<String>,
}

impl EndpointSpec {
    pub fn new(
        url: impl Into<String>,
        agent_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            agent_id: agent_id.into(),
            name: name.into(),
            prompt_source: PromptSource::Static,
            prompts: Vec::new(),
        }
    }

    pub fn with_prompts<I, S>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompts = prompts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prompt_source(mut self, source: PromptSource) -> Self {
        self.prompt_source = source;
        self
    }
}

/// Body submitted to the usage metering endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub wallet_address: String,
    pub agent_id: String,
    pub request_text: String,
    pub response_text: String,
    pub request_metadata: serde_json::Map<String, serde_json::Value>,
}

impl UsageReport {
    pub fn new(
        wallet_address: impl Into<String>,
        agent_id: impl Into<String>,
        request_text: impl Into<String>,
        response_text: impl Into<String>,
    ) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            agent_id: agent_id.into(),
            request_text: request_text.into(),
            response_text: response_text.into(),
            request_metadata: serde_json::Map::new(),
        }
    }
}

/// Shorten a wallet address for log prefixes: first six characters plus `...`.
pub fn short_wallet(wallet: &str) -> String {
    let prefix: String = wallet.chars().take(6).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_report_serializes_empty_metadata_object() {
        let report = UsageReport::new("0xabc", "agent_1", "hi", "hello");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["wallet_address"], "0xabc");
        assert_eq!(json["agent_id"], "agent_1");
        assert_eq!(json["request_text"], "hi");
        assert_eq!(json["response_text"], "hello");
        assert_eq!(json["request_metadata"], serde_json::json!({}));
    }

    #[test]
    fn endpoint_spec_defaults_to_static_prompts() {
        let spec: EndpointSpec = serde_json::from_value(serde_json::json!({
            "url": "https://example.test/main",
            "agentId": "agent",
            "name": "Example"
        }))
        .unwrap();
        assert_eq!(spec.prompt_source, PromptSource::Static);
        assert!(spec.prompts.is_empty());
    }

    #[test]
    fn short_wallet_keeps_six_chars() {
        assert_eq!(short_wallet("0x1234567890"), "0x1234...");
        assert_eq!(short_wallet("0x1"), "0x1...");
    }
}
