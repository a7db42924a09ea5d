pub mod egress;
pub mod error;
pub mod session;
pub mod stats;
pub mod traits;
pub mod types;

pub use egress::{EgressConfig, ProxyCredentials, ProxyParseError, ProxyScheme};
pub use error::KiteError;
pub use session::SessionState;
pub use stats::SessionStatistics;
pub use traits::{ChatClient, EntropyRandom, RandomSource, TransactionFeed, UsageReporter};
pub use types::{short_wallet, EndpointSpec, PromptSource, UsageReport};
