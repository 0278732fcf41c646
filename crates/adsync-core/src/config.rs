use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_COMPOSIO_BASE_URL: &str = "https://backend.composio.dev/api/v2";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // CI secret stores inject unset secrets as empty strings.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let composio_token = require("COMPOSIO_TOKEN")?;
    let spreadsheet_id = require("SPREADSHEET_ID")?;

    let env = parse_environment(&or_default("ADSYNC_ENV", "development"));
    let log_level = or_default("ADSYNC_LOG_LEVEL", "info");
    let log_file = Some(or_default("ADSYNC_LOG_FILE", "adsync.log"))
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let composio_base_url = or_default("COMPOSIO_BASE_URL", DEFAULT_COMPOSIO_BASE_URL);
    let ads_entity_id = or_default("ADSYNC_ADS_ENTITY_ID", "default");
    let sheets_entity_id = or_default("ADSYNC_SHEETS_ENTITY_ID", "default");

    let request_timeout_secs = parse_u64("ADSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let campaign_limit = parse_u32("ADSYNC_CAMPAIGN_LIMIT", "100")?;
    if campaign_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADSYNC_CAMPAIGN_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let insights_days = parse_u32("ADSYNC_INSIGHTS_DAYS", "7")?;
    let max_concurrent_campaigns = parse_usize("ADSYNC_MAX_CONCURRENT_CAMPAIGNS", "1")?.max(1);

    let clear_range = or_default("ADSYNC_CLEAR_RANGE", "A:Z");
    let write_range = or_default("ADSYNC_WRITE_RANGE", "A1");

    Ok(AppConfig {
        composio_token,
        spreadsheet_id,
        env,
        log_level,
        log_file,
        composio_base_url,
        ads_entity_id,
        sheets_entity_id,
        request_timeout_secs,
        campaign_limit,
        insights_days,
        max_concurrent_campaigns,
        clear_range,
        write_range,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
