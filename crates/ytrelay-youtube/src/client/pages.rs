//! Cursor-paged listing endpoints. Each call returns one page; driving the
//! cursor is left to [`crate::pagination::walk_pages`].

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::YoutubeError;
use crate::types::{CommentThread, ListResponse, PlaylistItem, SearchResult};

use super::{YoutubeClient, COMMENT_PAGE_LIMIT, LISTING_PAGE_LIMIT};

/// Publish-time window for `search.list`. Both bounds are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
}

impl SearchFilter {
    /// Window covering whole calendar days: from the start of `after` up to
    /// the end of `before`, both in UTC.
    #[must_use]
    pub fn from_dates(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self {
            published_after: after.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            published_before: before
                .map(|d| d.succ_opt().unwrap_or(d).and_time(NaiveTime::MIN).and_utc()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.published_after.is_none() && self.published_before.is_none()
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        [
            ("publishedAfter", self.published_after),
            ("publishedBefore", self.published_before),
        ]
        .into_iter()
        .filter_map(|(key, bound)| {
            bound.map(|t| (key, t.to_rfc3339_opts(SecondsFormat::Secs, true)))
        })
        .collect()
    }
}

impl YoutubeClient {
    /// One page of `search.list` for videos matching `query`, most viewed first,
    /// limited to `filter`'s publish window.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] when the API rejects the call (quota, bad key).
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body has an unexpected shape.
    pub async fn search_page(
        &self,
        query: &str,
        filter: &SearchFilter,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<ListResponse<SearchResult>, YoutubeError> {
        let max_results = max_results.clamp(1, LISTING_PAGE_LIMIT).to_string();
        let window = filter.query_params();
        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("order", "viewCount"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ];
        params.extend(window.iter().map(|(key, value)| (*key, value.as_str())));
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("search", &params).await
    }

    /// One page of `playlistItems.list` for `playlist_id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_page`]; a missing playlist is reported by the
    /// API as a 404 [`YoutubeError::Api`] with reason `playlistNotFound`.
    pub async fn playlist_items_page(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<ListResponse<PlaylistItem>, YoutubeError> {
        let max_results = max_results.clamp(1, LISTING_PAGE_LIMIT).to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("playlistItems", &params).await
    }

    /// One page of top-level comment threads (with inline replies) for a video.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_page`]. A video with comments turned off yields
    /// a 403 [`YoutubeError::Api`] with reason `commentsDisabled`.
    pub async fn comment_threads_page(
        &self,
        video_id: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<ListResponse<CommentThread>, YoutubeError> {
        let max_results = max_results.clamp(1, COMMENT_PAGE_LIMIT).to_string();
        let mut params = vec![
            ("part", "snippet,replies"),
            ("videoId", video_id),
            ("order", "relevance"),
            ("textFormat", "plainText"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("commentThreads", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filter_adds_no_parameters() {
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn dates_cover_whole_days_in_rfc3339() {
        let filter = SearchFilter::from_dates(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)));
        assert_eq!(
            filter.query_params(),
            vec![
                ("publishedAfter", "2024-01-01T00:00:00Z".to_string()),
                ("publishedBefore", "2025-01-01T00:00:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn single_bound_is_sent_alone() {
        let filter = SearchFilter::from_dates(None, Some(date(2024, 2, 28)));
        assert_eq!(
            filter.query_params(),
            vec![("publishedBefore", "2024-02-29T00:00:00Z".to_string())]
        );
    }
}
