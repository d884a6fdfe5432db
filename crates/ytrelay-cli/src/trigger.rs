use chrono::{NaiveDate, Utc};
use reqwest::Client;
use ytrelay_core::{AppConfig, ConfigError, Mode};
use ytrelay_webhook::{DispatchClient, DispatchRequest};

/// Fire a `repository_dispatch` event so the relay runs as a GitHub workflow.
/// `window` is the search publish window as `(after, before)`.
///
/// # Errors
///
/// Returns an error if `GITHUB_TOKEN` or `GITHUB_REPOSITORY` is not set, or if
/// GitHub rejects the event.
pub(crate) async fn run_dispatch(
    http: &Client,
    config: &AppConfig,
    mode: Mode,
    target: &str,
    max_results: Option<u32>,
    webhook_url: Option<&str>,
    window: (Option<NaiveDate>, Option<NaiveDate>),
) -> anyhow::Result<()> {
    let (after, before) = window;
    let request = DispatchRequest::for_job(
        mode,
        target,
        max_results.unwrap_or_else(|| mode.default_count()),
        webhook_url,
        Utc::now(),
    )
    .with_publish_window(after, before);
    let client = dispatch_client(http, config)?;

    client
        .trigger(&request)
        .await
        .map_err(|e| anyhow::anyhow!("repository dispatch failed: {e}"))?;

    let repository = config.github_repository.as_deref().unwrap_or_default();
    println!(
        "triggered {} for {repository} (webhook: {})",
        request.event_type,
        if webhook_url.is_some() { "set" } else { "not set" }
    );
    println!("follow the run at https://github.com/{repository}/actions");
    Ok(())
}

fn dispatch_client(http: &Client, config: &AppConfig) -> anyhow::Result<DispatchClient> {
    let token = config
        .github_token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("GITHUB_TOKEN".to_string()))?;
    let repository = config
        .github_repository
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("GITHUB_REPOSITORY".to_string()))?;

    Ok(DispatchClient::new(
        http.clone(),
        &config.github_api_url,
        token,
        repository,
    )?)
}
