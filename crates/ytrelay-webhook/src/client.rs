//! HTTP client for the delivery receiver.
//!
//! A receiver is any endpoint that accepts a JSON `POST`. Any 2xx status is
//! success; everything else, including transport failures, is a failed send.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::WebhookError;

/// Longest slice of a rejected response body kept in the error.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub struct WebhookClient {
    client: Client,
    url: Url,
}

impl WebhookClient {
    /// Creates a client posting to `url` over an already-configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidUrl`] if `url` does not parse or is not
    /// `http`/`https`.
    pub fn new(client: Client, url: &str) -> Result<Self, WebhookError> {
        let url = parse_http_url(url)?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POSTs `payload` as JSON.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Serialize`] if `payload` cannot be encoded.
    /// - [`WebhookError::Http`] on network failure or timeout.
    /// - [`WebhookError::UnexpectedStatus`] on any non-2xx response.
    pub async fn post_json<T: Serialize + ?Sized>(&self, payload: &T) -> Result<(), WebhookError> {
        let body = serde_json::to_vec(payload).map_err(|e| WebhookError::Serialize {
            context: "webhook payload".to_string(),
            source: e,
        })?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "webhook accepted payload");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(WebhookError::UnexpectedStatus {
            status: status.as_u16(),
            body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
        })
    }
}

pub(crate) fn parse_http_url(raw: &str) -> Result<Url, WebhookError> {
    let url = Url::parse(raw.trim()).map_err(|e| WebhookError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WebhookError::InvalidUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_owned(),
    }
}
