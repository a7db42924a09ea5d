//! Config validation: quota arithmetic, pacing and endpoint catalog checks.

use std::collections::HashSet;

use kiteforge_core::PromptSource;
use thiserror::Error;

use crate::schema::KiteForgeConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All error messages joined on one line.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Longest accepted quota window, ten years. Larger values overflow the
/// reset timestamp.
pub const MAX_WINDOW_HOURS: u32 = 24 * 366 * 10;

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &KiteForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_session(config, &mut report);
    validate_network(config, &mut report);
    validate_endpoints(config, &mut report);
    report
}

/// Points must be awarded in whole steps up to the cap.
fn validate_session(config: &KiteForgeConfig, report: &mut ValidationReport) {
    let Some(session) = &config.session else { return };

    match session.points_per_interaction {
        Some(0) => report.error(
            "session.pointsPerInteraction",
            "pointsPerInteraction must be >= 1",
        ),
        Some(reward) => {
            if let Some(cap) = session.daily_point_cap {
                if cap % reward != 0 {
                    report.error(
                        "session.dailyPointCap",
                        format!("dailyPointCap {cap} is not a multiple of pointsPerInteraction {reward}"),
                    );
                }
            }
        }
        None => {}
    }

    if session.daily_point_cap == Some(0) {
        report.warn(
            "session.dailyPointCap",
            "dailyPointCap is 0; sessions will only wait for resets",
        );
    }

    match session.window_hours {
        Some(0) => report.error("session.windowHours", "windowHours must be >= 1"),
        Some(hours) if hours > MAX_WINDOW_HOURS => report.error(
            "session.windowHours",
            format!("windowHours {hours} exceeds the maximum of {MAX_WINDOW_HOURS}"),
        ),
        _ => {}
    }

    if let (Some(min), Some(max)) = (session.cooldown_min_ms, session.cooldown_max_ms) {
        if min > max {
            report.error(
                "session.cooldownMinMs",
                format!("cooldownMinMs {min} is greater than cooldownMaxMs {max}"),
            );
        }
    }
}

fn validate_network(config: &KiteForgeConfig, report: &mut ValidationReport) {
    let Some(network) = &config.network else { return };

    if network.request_timeout_secs == Some(0) {
        report.error("network.requestTimeoutSecs", "requestTimeoutSecs must be >= 1");
    }
    if network.connect_timeout_secs == Some(0) {
        report.error("network.connectTimeoutSecs", "connectTimeoutSecs must be >= 1");
    }
    for (path, url) in [
        ("network.usageReportUrl", &network.usage_report_url),
        ("network.transactionFeedUrl", &network.transaction_feed_url),
    ] {
        if let Some(url) = url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                report.error(path, format!("'{url}' is not an http(s) URL"));
            }
        }
    }
}

/// At least one endpoint must be selectable without live data.
fn validate_endpoints(config: &KiteForgeConfig, report: &mut ValidationReport) {
    let Some(endpoints) = &config.endpoints else { return };

    if endpoints.is_empty() {
        report.error("endpoints", "Endpoint catalog is empty");
        return;
    }

    let mut names = HashSet::new();
    let mut live_slots = 0;
    for (i, endpoint) in endpoints.iter().enumerate() {
        let path = format!("endpoints[{i}]");
        if endpoint.url.trim().is_empty() {
            report.error(format!("{path}.url"), "Endpoint url cannot be empty");
        }
        if endpoint.name.trim().is_empty() {
            report.error(format!("{path}.name"), "Endpoint name cannot be empty");
        }
        if !names.insert(endpoint.name.as_str()) {
            report.warn(
                format!("{path}.name"),
                format!("Duplicate endpoint name '{}'; statistics will be merged", endpoint.name),
            );
        }
        match endpoint.prompt_source {
            PromptSource::RecentTransactions => live_slots += 1,
            PromptSource::Static if endpoint.prompts.is_empty() => report.warn(
                format!("{path}.prompts"),
                format!("Endpoint '{}' has no prompts and will never be selected", endpoint.name),
            ),
            PromptSource::Static => {}
        }
    }

    if live_slots > 1 {
        report.warn(
            "endpoints",
            "Only the first recent_transactions endpoint receives live prompts",
        );
    }

    let has_static_prompts = endpoints
        .iter()
        .any(|e| e.prompt_source == PromptSource::Static && !e.prompts.is_empty());
    if !has_static_prompts {
        report.error(
            "endpoints",
            "No endpoint has static prompts; sessions would idle whenever the transaction feed is empty",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::SessionConfig;
    use kiteforge_core::EndpointSpec;

    fn defaulted() -> KiteForgeConfig {
        apply_all_defaults(KiteForgeConfig::default())
    }

    #[test]
    fn defaults_are_valid() {
        let report = validate(&defaulted());
        assert!(report.is_valid(), "{}", report.error_summary());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn cap_must_be_multiple_of_reward() {
        let mut config = defaulted();
        config.session = Some(SessionConfig {
            daily_point_cap: Some(205),
            points_per_interaction: Some(10),
            ..Default::default()
        });
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "session.dailyPointCap");
    }

    #[test]
    fn zero_reward_is_error() {
        let mut config = defaulted();
        if let Some(session) = config.session.as_mut() {
            session.points_per_interaction = Some(0);
        }
        let report = validate(&config);
        assert!(report
            .errors
            .iter()
            .any(|e| e.path == "session.pointsPerInteraction"));
    }

    #[test]
    fn window_must_fit_reset_timestamp() {
        let mut config = defaulted();
        if let Some(session) = config.session.as_mut() {
            session.window_hours = Some(u32::MAX);
        }
        let report = validate(&config);
        assert!(report.errors.iter().any(|e| e.path == "session.windowHours"));

        if let Some(session) = config.session.as_mut() {
            session.window_hours = Some(MAX_WINDOW_HOURS);
        }
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn inverted_cooldown_is_error() {
        let mut config = defaulted();
        if let Some(session) = config.session.as_mut() {
            session.cooldown_min_ms = Some(5_000);
            session.cooldown_max_ms = Some(1_000);
        }
        assert!(!validate(&config).is_valid());
    }

    #[test]
    fn empty_catalog_is_error() {
        let mut config = defaulted();
        config.endpoints = Some(Vec::new());
        let report = validate(&config);
        assert!(report.error_summary().contains("Endpoint catalog is empty"));
    }

    #[test]
    fn catalog_without_static_prompts_is_error() {
        let mut config = defaulted();
        config.endpoints = Some(vec![
            EndpointSpec::new("https://a.example", "a", "Analyzer")
                .with_prompt_source(PromptSource::RecentTransactions),
            EndpointSpec::new("https://b.example", "b", "Empty"),
        ]);
        let report = validate(&config);
        assert!(!report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "endpoints[1].prompts"));
    }

    #[test]
    fn duplicate_names_warn() {
        let mut config = defaulted();
        config.endpoints = Some(vec![
            EndpointSpec::new("https://a.example", "a", "Same").with_prompts(["hi"]),
            EndpointSpec::new("https://b.example", "b", "Same").with_prompts(["hello"]),
        ]);
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn non_http_report_url_is_error() {
        let mut config = defaulted();
        if let Some(network) = config.network.as_mut() {
            network.usage_report_url = Some("ftp://meter.example".into());
        }
        assert!(!validate(&config).is_valid());
    }
}
