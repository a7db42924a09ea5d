//! Remote collaborators of a session: chat endpoints, the usage meter and
//! the transaction explorer, plus the endpoint catalog they are chosen from.

pub mod catalog;
pub mod chat;
pub mod http;
pub mod mock;
pub mod registry;
pub mod sse;
pub mod transactions;
pub mod usage;

pub use catalog::{analysis_prompts, default_endpoints, ANALYSIS_PROMPT_PREFIX};
pub use chat::SseChatClient;
pub use http::{HttpClientCache, HttpSettings, DEFAULT_USER_AGENT};
pub use registry::{EndpointRegistry, Selection};
pub use transactions::{ExplorerTransactionFeed, DEFAULT_TRANSACTION_FEED_URL};
pub use usage::{HttpUsageReporter, DEFAULT_USAGE_REPORT_URL};
