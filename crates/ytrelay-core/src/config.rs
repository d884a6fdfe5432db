use std::path::PathBuf;

use crate::app_config::{AppConfig, ShortPagePolicy};
use crate::ConfigError;

pub(crate) const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Returns the looked-up value, treating an empty or whitespace-only string as
/// absent. Workflow runners export unset inputs as empty strings.
pub(crate) fn lookup_non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup_non_empty(&lookup, var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let api_base_url = or_default("YTRELAY_API_BASE_URL", DEFAULT_API_BASE_URL);
    let request_timeout_secs = parse_u64("YTRELAY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("YTRELAY_USER_AGENT", "ytrelay/0.1 (webhook-relay)");
    let proxy_url = lookup_non_empty(&lookup, "YTRELAY_PROXY_URL");
    let delivery_delay_ms = parse_u64("YTRELAY_DELIVERY_DELAY_MS", "500")?;
    let page_delay_ms = parse_u64("YTRELAY_PAGE_DELAY_MS", "0")?;

    let short_page_policy = or_default("YTRELAY_SHORT_PAGE_POLICY", "continue")
        .parse::<ShortPagePolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "YTRELAY_SHORT_PAGE_POLICY".to_string(),
            reason,
        })?;

    let batch_size = parse_positive_usize("BATCH_SIZE", "100")?;
    let output_dir = PathBuf::from(or_default("YTRELAY_OUTPUT_DIR", "."));
    let log_level = or_default("YTRELAY_LOG_LEVEL", "info");

    let github_token = lookup_non_empty(&lookup, "GITHUB_TOKEN");
    let github_repository = lookup_non_empty(&lookup, "GITHUB_REPOSITORY");
    if let Some(repo) = &github_repository {
        validate_repository(repo)?;
    }
    let github_api_url = or_default("GITHUB_API_URL", DEFAULT_GITHUB_API_URL);

    Ok(AppConfig {
        api_base_url,
        request_timeout_secs,
        user_agent,
        proxy_url,
        delivery_delay_ms,
        page_delay_ms,
        short_page_policy,
        batch_size,
        output_dir,
        log_level,
        github_token,
        github_repository,
        github_api_url,
    })
}

/// `GITHUB_REPOSITORY` must be `owner/repo`.
fn validate_repository(repo: &str) -> Result<(), ConfigError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(ConfigError::InvalidEnvVar {
            var: "GITHUB_REPOSITORY".to_string(),
            reason: format!("expected \"owner/repo\", got \"{repo}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
