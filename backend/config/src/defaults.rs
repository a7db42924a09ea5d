//! Config defaults: fills every unset field after load.

use std::path::PathBuf;

use kiteforge_remote::{
    default_endpoints, DEFAULT_TRANSACTION_FEED_URL, DEFAULT_USAGE_REPORT_URL, DEFAULT_USER_AGENT,
};

use crate::schema::{KiteForgeConfig, LoggingConfig, NetworkConfig, SessionConfig};

pub const DEFAULT_WALLETS_FILE: &str = "wallets.txt";
pub const DEFAULT_PROXIES_FILE: &str = "proxies.txt";

pub const DEFAULT_DAILY_POINT_CAP: u32 = 200;
pub const DEFAULT_POINTS_PER_INTERACTION: u32 = 10;
pub const DEFAULT_WINDOW_HOURS: u32 = 24;
pub const DEFAULT_COOLDOWN_MIN_MS: u64 = 1_000;
pub const DEFAULT_COOLDOWN_MAX_MS: u64 = 3_000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TRANSACTION_TYPES: &str = "coin_transfer";
pub const DEFAULT_TRANSACTION_AGE: &str = "5m";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: KiteForgeConfig) -> KiteForgeConfig {
    let config = apply_path_defaults(config);
    let config = apply_session_defaults(config);
    let config = apply_network_defaults(config);
    let config = apply_logging_defaults(config);
    apply_endpoint_defaults(config)
}

fn apply_path_defaults(mut config: KiteForgeConfig) -> KiteForgeConfig {
    config
        .wallets
        .get_or_insert_with(|| PathBuf::from(DEFAULT_WALLETS_FILE));
    config
        .proxies
        .get_or_insert_with(|| PathBuf::from(DEFAULT_PROXIES_FILE));
    config
}

fn apply_session_defaults(mut config: KiteForgeConfig) -> KiteForgeConfig {
    let session = config.session.get_or_insert_with(SessionConfig::default);
    session.daily_point_cap.get_or_insert(DEFAULT_DAILY_POINT_CAP);
    session
        .points_per_interaction
        .get_or_insert(DEFAULT_POINTS_PER_INTERACTION);
    session.window_hours.get_or_insert(DEFAULT_WINDOW_HOURS);
    session.cooldown_min_ms.get_or_insert(DEFAULT_COOLDOWN_MIN_MS);
    session.cooldown_max_ms.get_or_insert(DEFAULT_COOLDOWN_MAX_MS);
    config
}

fn apply_network_defaults(mut config: KiteForgeConfig) -> KiteForgeConfig {
    let network = config.network.get_or_insert_with(NetworkConfig::default);
    network
        .request_timeout_secs
        .get_or_insert(DEFAULT_REQUEST_TIMEOUT_SECS);
    network
        .connect_timeout_secs
        .get_or_insert(DEFAULT_CONNECT_TIMEOUT_SECS);
    network
        .user_agent
        .get_or_insert_with(|| DEFAULT_USER_AGENT.to_string());
    network
        .usage_report_url
        .get_or_insert_with(|| DEFAULT_USAGE_REPORT_URL.to_string());
    network
        .transaction_feed_url
        .get_or_insert_with(|| DEFAULT_TRANSACTION_FEED_URL.to_string());
    network
        .transaction_types
        .get_or_insert_with(|| DEFAULT_TRANSACTION_TYPES.to_string());
    network
        .transaction_age
        .get_or_insert_with(|| DEFAULT_TRANSACTION_AGE.to_string());
    config
}

fn apply_logging_defaults(mut config: KiteForgeConfig) -> KiteForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| PathBuf::from(DEFAULT_LOG_DIR));
    config
}

fn apply_endpoint_defaults(mut config: KiteForgeConfig) -> KiteForgeConfig {
    config.endpoints.get_or_insert_with(default_endpoints);
    config
}
