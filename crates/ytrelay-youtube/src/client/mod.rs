//! HTTP client for the YouTube Data API v3.

mod details;
mod pages;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::types::ApiErrorEnvelope;

pub use details::{CHANNEL_PARTS, VIDEO_PARTS};
pub use pages::SearchFilter;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Page size ceiling for `search.list` and `playlistItems.list`.
pub const LISTING_PAGE_LIMIT: usize = 50;

/// Page size ceiling for `commentThreads.list`.
pub const COMMENT_PAGE_LIMIT: usize = 100;

/// Most ids `videos.list` and `channels.list` accept in one call.
pub const DETAIL_BATCH_MAX: usize = 50;

/// Client for the YouTube Data API.
///
/// Holds an already-configured `reqwest::Client` (timeouts, proxy, user agent
/// are decided by the caller), the API key, and the base URL. Non-2xx
/// responses are decoded from Google's error envelope into
/// [`YoutubeError::Api`] so callers can branch on the reason.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// # Errors
    ///
    /// Returns [`YoutubeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Result<Self, YoutubeError> {
        // Exactly one trailing slash so `join("search")` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds `{base}/{resource}?key=...&...` with every value percent-encoded.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(resource)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GETs `resource` and decodes the JSON body into `T`.
    ///
    /// Neither the URL nor the key ever appears in a returned error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let url = self.build_url(resource, params)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = Self::status_error(status, &body, resource);
            tracing::debug!(resource, status = status.as_u16(), error = %err, "YouTube API call failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!("{resource} response"),
            source: e,
        })
    }

    fn status_error(status: StatusCode, body: &str, resource: &str) -> YoutubeError {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => {
                let first = envelope.error.errors.into_iter().next();
                let reason = first
                    .as_ref()
                    .and_then(|item| item.reason.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                let message = if envelope.error.message.is_empty() {
                    first.and_then(|item| item.message).unwrap_or_default()
                } else {
                    envelope.error.message
                };
                YoutubeError::Api {
                    status: status.as_u16(),
                    reason,
                    message,
                }
            }
            Err(_) => YoutubeError::UnexpectedStatus {
                status: status.as_u16(),
                resource: resource.to_owned(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
