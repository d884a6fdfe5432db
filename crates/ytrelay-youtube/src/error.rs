use thiserror::Error;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with the Google error envelope.
    #[error("YouTube API error {status} ({reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {resource}")]
    UnexpectedStatus { status: u16, resource: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("unrecognised channel reference \"{reference}\"")]
    InvalidChannelReference { reference: String },

    #[error("channel {channel_id} has no uploads playlist")]
    NoUploadsPlaylist { channel_id: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("listing page {page} failed (cursor {}): {source}", .cursor.as_deref().unwrap_or("<first>"))]
    Listing {
        page: usize,
        cursor: Option<String>,
        #[source]
        source: Box<YoutubeError>,
    },

    #[error("detail batch {batch_index} ({batch_len} ids) failed: {source}")]
    BatchDetail {
        batch_index: usize,
        batch_len: usize,
        #[source]
        source: Box<YoutubeError>,
    },
}

// Request URLs carry the API key, so it is stripped before the error travels.
impl From<reqwest::Error> for YoutubeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

impl YoutubeError {
    /// The upstream error reason (`quotaExceeded`, `commentsDisabled`, ...),
    /// looking through listing and batch wrappers.
    #[must_use]
    pub fn api_reason(&self) -> Option<&str> {
        match self {
            Self::Api { reason, .. } => Some(reason),
            Self::Listing { source, .. } | Self::BatchDetail { source, .. } => source.api_reason(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_comments_disabled(&self) -> bool {
        self.api_reason() == Some("commentsDisabled")
    }

    /// Number of listing pages that succeeded before this error, when it
    /// came from a page walk.
    #[must_use]
    pub fn pages_before_failure(&self) -> Option<usize> {
        match self {
            Self::Listing { page, .. } => Some(page.saturating_sub(1)),
            _ => None,
        }
    }
}
