use thiserror::Error;

/// Errors returned by the webhook and repository-dispatch clients.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Network, TLS, or timeout failure from the underlying HTTP client. The
    /// request URL is stripped because webhook URLs often embed a token.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The receiver answered with a status outside the accepted range.
    #[error("receiver returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The payload could not be encoded as JSON.
    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
