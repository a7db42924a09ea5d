//! `kiteforge-config`: KiteForge runtime configuration.
//!
//! Provides:
//! - Typed YAML config schema with camelCase keys
//! - `${ENV_VAR}` substitution and `KITEFORGE_*` overrides
//! - Default value application
//! - Validation of quota arithmetic, pacing and the endpoint catalog
//! - Wallet and proxy list loaders

pub mod defaults;
pub mod env;
pub mod io;
pub mod lists;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, process_env, resolve_env_vars_with, MissingEnvVarError};
pub use io::{load_config, parse_config, DEFAULT_CONFIG_FILE};
pub use lists::{load_proxies, load_wallets, parse_proxies};
pub use schema::{KiteForgeConfig, LoggingConfig, NetworkConfig, SessionConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport, MAX_WINDOW_HOURS};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use kiteforge_core::KiteError;

/// Load, substitute env vars, apply defaults and overrides, and validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// warnings are logged; validation errors are returned as
/// `KiteError::StartupConfig`.
pub async fn load_and_prepare(path: &Path, env: &HashMap<String, String>) -> Result<KiteForgeConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config, env)
}

/// Everything `load_and_prepare` does after reading the file.
pub fn prepare(raw_config: KiteForgeConfig, env: &HashMap<String, String>) -> Result<KiteForgeConfig> {
    let value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env)
        .context("Failed to resolve env vars in config")?;
    let config: KiteForgeConfig = serde_json::from_value(value)
        .context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);
    let config = apply_env_overrides(config, env);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        return Err(KiteError::StartupConfig(report.error_summary()).into());
    }

    Ok(config)
}
