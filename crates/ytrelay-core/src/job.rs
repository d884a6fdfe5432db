//! Per-run job parameters: which mode to run, against what target, how many
//! results, and where to deliver them.
//!
//! Values come from the environment (`MODE`, `SEARCH_QUERY`, `VIDEO_ID`, ...)
//! and are overridden by whatever the caller passes on the command line.

use chrono::NaiveDate;

use crate::app_config::Mode;
use crate::config::lookup_non_empty;
use crate::ConfigError;

/// A fully resolved job, validated before any network call is made.
#[derive(Clone)]
pub struct JobConfig {
    pub mode: Mode,
    /// Search query, video id, or channel reference depending on `mode`.
    pub target: String,
    /// Number of entities to collect.
    pub count: u32,
    pub webhook_url: Option<String>,
    pub api_key: String,
    /// Search only: earliest publish date, inclusive.
    pub published_after: Option<NaiveDate>,
    /// Search only: latest publish date, inclusive.
    pub published_before: Option<NaiveDate>,
}

impl std::fmt::Debug for JobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobConfig")
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("count", &self.count)
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "[set]"))
            .field("api_key", &"[redacted]")
            .field("published_after", &self.published_after)
            .field("published_before", &self.published_before)
            .finish()
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct JobOverrides {
    pub mode: Option<Mode>,
    pub target: Option<String>,
    pub count: Option<u32>,
    pub webhook_url: Option<String>,
    pub api_key: Option<String>,
    pub published_after: Option<NaiveDate>,
    pub published_before: Option<NaiveDate>,
}

/// Resolve a [`JobConfig`] from the process environment plus `overrides`.
///
/// # Errors
///
/// Returns `ConfigError` when the API key or mode target is missing, or when
/// a count is not a positive integer.
pub fn load_job_config(overrides: &JobOverrides) -> Result<JobConfig, ConfigError> {
    build_job_config(|key| std::env::var(key), overrides)
}

pub(crate) fn build_job_config<F>(
    lookup: F,
    overrides: &JobOverrides,
) -> Result<JobConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let mode = match overrides.mode {
        Some(mode) => mode,
        None => lookup_non_empty(&lookup, "MODE")
            .unwrap_or_else(|| "search".to_string())
            .parse::<Mode>()?,
    };

    let api_key = non_empty(overrides.api_key.as_deref())
        .or_else(|| lookup_non_empty(&lookup, "YOUTUBE_API_KEY"))
        .ok_or(ConfigError::MissingParameter {
            param: "YouTube API key",
            env_var: "YOUTUBE_API_KEY",
        })?;

    let (target_param, target_vars, count_var) = match mode {
        Mode::Search => ("search query", &["SEARCH_QUERY"][..], "MAX_RESULTS"),
        Mode::Comments => ("video id", &["VIDEO_ID"][..], "MAX_COMMENTS"),
        Mode::ChannelVideos => (
            "channel id or handle",
            &["CHANNEL_ID", "CHANNEL_HANDLE"][..],
            "MAX_RESULTS",
        ),
    };

    let target = non_empty(overrides.target.as_deref())
        .or_else(|| {
            target_vars
                .iter()
                .find_map(|var| lookup_non_empty(&lookup, var))
        })
        .ok_or(ConfigError::MissingParameter {
            param: target_param,
            env_var: target_vars[0],
        })?;

    let count = match overrides.count {
        Some(0) => {
            return Err(ConfigError::InvalidEnvVar {
                var: count_var.to_string(),
                reason: "must be at least 1".to_string(),
            })
        }
        Some(n) => n,
        None => parse_count(
            lookup_non_empty(&lookup, count_var),
            count_var,
            mode.default_count(),
        )?,
    };

    let webhook_url = non_empty(overrides.webhook_url.as_deref())
        .or_else(|| lookup_non_empty(&lookup, "WEBHOOK_URL"));

    let published_after = match overrides.published_after {
        Some(date) => Some(date),
        None => parse_date(lookup_non_empty(&lookup, "PUBLISHED_AFTER"), "PUBLISHED_AFTER")?,
    };
    let published_before = match overrides.published_before {
        Some(date) => Some(date),
        None => parse_date(lookup_non_empty(&lookup, "PUBLISHED_BEFORE"), "PUBLISHED_BEFORE")?,
    };
    if let (Some(after), Some(before)) = (published_after, published_before) {
        if after > before {
            return Err(ConfigError::InvalidEnvVar {
                var: "PUBLISHED_BEFORE".to_string(),
                reason: format!("{before} is earlier than PUBLISHED_AFTER {after}"),
            });
        }
    }

    Ok(JobConfig {
        mode,
        target,
        count,
        webhook_url,
        api_key,
        published_after,
        published_before,
    })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a human-readable message if `raw` is not a valid calendar date.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got \"{raw}\": {e}"))
}

fn parse_date(raw: Option<String>, var: &str) -> Result<Option<NaiveDate>, ConfigError> {
    raw.map(|raw| {
        parse_date_arg(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })
    })
    .transpose()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn parse_count(raw: Option<String>, var: &str, default: u32) -> Result<u32, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u32>() {
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
}
