//! Shared HTTP transport.
//!
//! One `reqwest::Client` is built at startup from [`TransportConfig`] and
//! handed to every API client. Proxy selection happens here and nowhere else.

use std::time::Duration;

use reqwest::{Client, Proxy, Url};
use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid proxy URL: {reason}")]
    InvalidProxy { reason: String },
}

#[derive(Clone)]
pub struct TransportConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// `http://`, `https://`, or `socks5://` proxy applied to all requests.
    pub proxy_url: Option<String>,
}

impl TransportConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            connect_timeout_secs: 10,
            user_agent: config.user_agent.clone(),
            proxy_url: config.proxy_url.clone(),
        }
    }
}

/// Builds the HTTP client used for every upstream and webhook call.
///
/// # Errors
///
/// Returns [`TransportError::InvalidProxy`] if the proxy URL is rejected, or
/// [`TransportError::Http`] if the client cannot be constructed.
pub fn build_http_client(config: &TransportConfig) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(&config.user_agent);

    if let Some(proxy_url) = &config.proxy_url {
        validate_proxy_url(proxy_url)?;
        let proxy = Proxy::all(proxy_url).map_err(|e| TransportError::InvalidProxy {
            reason: e.to_string(),
        })?;
        tracing::debug!("routing HTTP traffic through configured proxy");
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// `Proxy::all` accepts any scheme and only fails on the first request.
fn validate_proxy_url(raw: &str) -> Result<(), TransportError> {
    let url = Url::parse(raw).map_err(|e| TransportError::InvalidProxy {
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" | "socks5" | "socks5h" => Ok(()),
        other => Err(TransportError::InvalidProxy {
            reason: format!("unsupported proxy scheme \"{other}\""),
        }),
    }
}
