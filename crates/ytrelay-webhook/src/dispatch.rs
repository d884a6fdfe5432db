//! GitHub `repository_dispatch` trigger.
//!
//! Fires an event that a workflow in the target repository listens for, so the
//! same relay job runs remotely. The workflow reads its parameters from
//! `client_payload`.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Serialize;
use ytrelay_core::Mode;

use crate::client::parse_http_url;
use crate::error::WebhookError;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Mode-specific parameters for the remote job. Counts are strings because the
/// workflow consumes them as `inputs`; `mode` is the value the workflow
/// exports as `MODE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientPayload {
    Search {
        mode: String,
        search_query: String,
        max_results: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        webhook_url: Option<String>,
        /// `YYYY-MM-DD`.
        #[serde(skip_serializing_if = "Option::is_none")]
        published_after: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        published_before: Option<String>,
    },
    Comments {
        mode: String,
        video_id: String,
        max_comments: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        webhook_url: Option<String>,
    },
    ChannelVideos {
        mode: String,
        channel_id: String,
        max_results: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        webhook_url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRequest {
    pub event_type: &'static str,
    pub client_payload: ClientPayload,
}

impl DispatchRequest {
    /// Builds the event for one relay job.
    #[must_use]
    pub fn for_job(
        mode: Mode,
        target: &str,
        count: u32,
        webhook_url: Option<&str>,
        requested_at: DateTime<Utc>,
    ) -> Self {
        let target = target.to_owned();
        let count = count.to_string();
        let timestamp = requested_at.to_rfc3339();
        let webhook_url = webhook_url.map(str::to_owned);
        let mode_name = mode.to_string();

        let client_payload = match mode {
            Mode::Search => ClientPayload::Search {
                mode: mode_name,
                search_query: target,
                max_results: count,
                timestamp,
                webhook_url,
                published_after: None,
                published_before: None,
            },
            Mode::Comments => ClientPayload::Comments {
                mode: mode_name,
                video_id: target,
                max_comments: count,
                timestamp,
                webhook_url,
            },
            Mode::ChannelVideos => ClientPayload::ChannelVideos {
                mode: mode_name,
                channel_id: target,
                max_results: count,
                timestamp,
                webhook_url,
            },
        };

        Self {
            event_type: mode.dispatch_event_type(),
            client_payload,
        }
    }

    /// Restricts a search job to videos published between the two dates.
    /// Other modes ignore the window.
    #[must_use]
    pub fn with_publish_window(
        mut self,
        after: Option<NaiveDate>,
        before: Option<NaiveDate>,
    ) -> Self {
        if let ClientPayload::Search {
            published_after,
            published_before,
            ..
        } = &mut self.client_payload
        {
            *published_after = after.map(|d| d.format("%Y-%m-%d").to_string());
            *published_before = before.map(|d| d.format("%Y-%m-%d").to_string());
        }
        self
    }
}

pub struct DispatchClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl std::fmt::Debug for DispatchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl DispatchClient {
    /// Creates a client for `repository` (`owner/repo`) on the GitHub API at
    /// `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidUrl`] if `api_url` is not an http(s) URL
    /// or `repository` is not in `owner/repo` form.
    pub fn new(
        client: Client,
        api_url: &str,
        token: &str,
        repository: &str,
    ) -> Result<Self, WebhookError> {
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| WebhookError::InvalidUrl {
                url: repository.to_owned(),
                reason: "repository must be in owner/repo form".to_string(),
            })?;

        let mut endpoint = parse_http_url(api_url)?;
        endpoint
            .path_segments_mut()
            .map_err(|()| WebhookError::InvalidUrl {
                url: api_url.to_owned(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "dispatches"]);

        Ok(Self {
            client,
            endpoint,
            token: token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the dispatch event. GitHub answers 204 on success.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Http`] on network failure.
    /// - [`WebhookError::UnexpectedStatus`] on any non-2xx response, for
    ///   example 401 for a bad token or 404 for an unknown repository.
    pub async fn trigger(&self, request: &DispatchRequest) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                event_type = request.event_type,
                status = status.as_u16(),
                "repository dispatch accepted"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(WebhookError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn requested_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn search_payload_uses_string_counts() {
        let request = DispatchRequest::for_job(Mode::Search, "HONOR 400", 75, None, requested_at());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "event_type": "youtube-search",
                "client_payload": {
                    "mode": "search",
                    "search_query": "HONOR 400",
                    "max_results": "75",
                    "timestamp": "2025-06-01T08:00:00+00:00"
                }
            })
        );
    }

    #[test]
    fn comments_payload_carries_webhook_url() {
        let request = DispatchRequest::for_job(
            Mode::Comments,
            "dQw4w9WgXcQ",
            120,
            Some("https://hooks.example.com/in"),
            requested_at(),
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["event_type"], "youtube-comments");
        assert_eq!(value["client_payload"]["mode"], "comments");
        assert_eq!(value["client_payload"]["video_id"], "dQw4w9WgXcQ");
        assert_eq!(value["client_payload"]["max_comments"], "120");
        assert_eq!(
            value["client_payload"]["webhook_url"],
            "https://hooks.example.com/in"
        );
    }

    #[test]
    fn channel_payload_uses_channel_id_key() {
        let request =
            DispatchRequest::for_job(Mode::ChannelVideos, "@mkbhd", 30, None, requested_at());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["event_type"], "youtube-channel-videos");
        assert_eq!(value["client_payload"]["mode"], "channel-videos");
        assert_eq!(value["client_payload"]["channel_id"], "@mkbhd");
        assert_eq!(value["client_payload"]["max_results"], "30");
    }

    #[test]
    fn search_payload_carries_publish_window_dates() {
        let request = DispatchRequest::for_job(Mode::Search, "HONOR test", 3, None, requested_at())
            .with_publish_window(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        let payload = &serde_json::to_value(&request).unwrap()["client_payload"];
        assert_eq!(payload["published_after"], "2024-01-01");
        assert!(payload.get("published_before").is_none());
    }

    #[test]
    fn publish_window_is_ignored_outside_search() {
        let request = DispatchRequest::for_job(Mode::Comments, "vid", 10, None, requested_at())
            .with_publish_window(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        let payload = &serde_json::to_value(&request).unwrap()["client_payload"];
        assert!(payload.get("published_after").is_none());
    }

    #[test]
    fn endpoint_is_built_from_api_url_and_repository() {
        for api_url in ["https://api.github.com", "https://api.github.com/"] {
            let client = DispatchClient::new(Client::new(), api_url, "t", "octo/relay").unwrap();
            assert_eq!(
                client.endpoint().as_str(),
                "https://api.github.com/repos/octo/relay/dispatches"
            );
        }
    }

    #[test]
    fn malformed_repository_is_rejected() {
        for repository in ["", "octo", "/relay", "octo/", "a/b/c"] {
            assert!(
                matches!(
                    DispatchClient::new(Client::new(), DEFAULT_GITHUB_API_URL, "t", repository),
                    Err(WebhookError::InvalidUrl { .. })
                ),
                "expected InvalidUrl for {repository:?}"
            );
        }
    }

    #[test]
    fn debug_output_redacts_token() {
        let client =
            DispatchClient::new(Client::new(), DEFAULT_GITHUB_API_URL, "ghp_secret", "o/r").unwrap();
        assert!(!format!("{client:?}").contains("ghp_secret"));
    }
}
