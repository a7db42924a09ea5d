use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Duration as ChronoDuration;

use kiteforge_config::defaults::{
    DEFAULT_COOLDOWN_MAX_MS, DEFAULT_COOLDOWN_MIN_MS, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_DAILY_POINT_CAP, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, DEFAULT_POINTS_PER_INTERACTION,
    DEFAULT_PROXIES_FILE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TRANSACTION_AGE,
    DEFAULT_TRANSACTION_TYPES, DEFAULT_WALLETS_FILE, DEFAULT_WINDOW_HOURS,
};
use kiteforge_config::{KiteForgeConfig, MAX_WINDOW_HOURS};
use kiteforge_core::EndpointSpec;
use kiteforge_remote::{
    default_endpoints, HttpSettings, DEFAULT_TRANSACTION_FEED_URL, DEFAULT_USAGE_REPORT_URL,
    DEFAULT_USER_AGENT,
};
use kiteforge_scheduler::{CooldownRange, SessionSettings};

/// Paths given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub wallets: Option<PathBuf>,
    pub proxies: Option<PathBuf>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub wallets_path: PathBuf,
    pub proxies_path: PathBuf,
    pub session: SessionSettings,
    pub http: HttpSettings,
    pub usage_report_url: String,
    pub transaction_feed_url: String,
    pub transaction_types: String,
    pub transaction_age: String,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub endpoints: Vec<EndpointSpec>,
}

impl Config {
    /// Flatten a prepared config file plus command-line overrides.
    pub fn resolve(file: KiteForgeConfig, overrides: PathOverrides) -> Result<Self> {
        let session = file.session.unwrap_or_default();
        let network = file.network.unwrap_or_default();
        let logging = file.logging.unwrap_or_default();

        let window_hours = session.window_hours.unwrap_or(DEFAULT_WINDOW_HOURS);
        anyhow::ensure!(
            window_hours <= MAX_WINDOW_HOURS,
            "windowHours {window_hours} exceeds the maximum of {MAX_WINDOW_HOURS}"
        );
        let window = ChronoDuration::try_hours(i64::from(window_hours))
            .context("windowHours is out of range")?;

        Ok(Self {
            wallets_path: overrides
                .wallets
                .or(file.wallets)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WALLETS_FILE)),
            proxies_path: overrides
                .proxies
                .or(file.proxies)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROXIES_FILE)),
            session: SessionSettings {
                daily_cap: session.daily_point_cap.unwrap_or(DEFAULT_DAILY_POINT_CAP),
                reward: session
                    .points_per_interaction
                    .unwrap_or(DEFAULT_POINTS_PER_INTERACTION),
                window,
                cooldown: CooldownRange::from_millis(
                    session.cooldown_min_ms.unwrap_or(DEFAULT_COOLDOWN_MIN_MS),
                    session.cooldown_max_ms.unwrap_or(DEFAULT_COOLDOWN_MAX_MS),
                ),
            },
            http: HttpSettings {
                request_timeout: Duration::from_secs(
                    network
                        .request_timeout_secs
                        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
                ),
                connect_timeout: Duration::from_secs(
                    network
                        .connect_timeout_secs
                        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                ),
                user_agent: network
                    .user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            },
            usage_report_url: network
                .usage_report_url
                .unwrap_or_else(|| DEFAULT_USAGE_REPORT_URL.to_string()),
            transaction_feed_url: network
                .transaction_feed_url
                .unwrap_or_else(|| DEFAULT_TRANSACTION_FEED_URL.to_string()),
            transaction_types: network
                .transaction_types
                .unwrap_or_else(|| DEFAULT_TRANSACTION_TYPES.to_string()),
            transaction_age: network
                .transaction_age
                .unwrap_or_else(|| DEFAULT_TRANSACTION_AGE.to_string()),
            log_level: logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: logging
                .dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            endpoints: file.endpoints.unwrap_or_else(default_endpoints),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiteforge_config::{apply_all_defaults, parse_config};

    #[test]
    fn resolves_defaults() {
        let config = Config::resolve(
            apply_all_defaults(KiteForgeConfig::default()),
            PathOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.session, SessionSettings::default());
        assert_eq!(config.http.request_timeout, Duration::from_secs(120));
        assert_eq!(config.http.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.wallets_path, PathBuf::from("wallets.txt"));
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
    }

    #[test]
    fn command_line_paths_win() {
        let file = parse_config("wallets: file-wallets.txt\nproxies: file-proxies.txt\n").unwrap();
        let config = Config::resolve(
            file,
            PathOverrides {
                wallets: Some(PathBuf::from("cli-wallets.txt")),
                proxies: None,
            },
        )
        .unwrap();
        assert_eq!(config.wallets_path, PathBuf::from("cli-wallets.txt"));
        assert_eq!(config.proxies_path, PathBuf::from("file-proxies.txt"));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let file = parse_config("session:\n  windowHours: 4294967295\n").unwrap();
        let err = Config::resolve(file, PathOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("windowHours"));
    }

    #[test]
    fn session_values_map_to_settings() {
        let file = parse_config(
            "session:\n  dailyPointCap: 100\n  pointsPerInteraction: 5\n  windowHours: 12\n  cooldownMinMs: 200\n  cooldownMaxMs: 400\n",
        )
        .unwrap();
        let config = Config::resolve(file, PathOverrides::default()).unwrap();
        assert_eq!(config.session.daily_cap, 100);
        assert_eq!(config.session.reward, 5);
        assert_eq!(config.session.window, ChronoDuration::hours(12));
        assert_eq!(config.session.cooldown, CooldownRange::from_millis(200, 400));
    }
}
