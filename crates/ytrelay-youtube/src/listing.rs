//! Listing stubs: the per-video fields a listing call already carries before
//! any detail lookup.

use crate::pagination::Keyed;
use crate::types::{Channel, CommentThread, ListingSnippet, PlaylistItem, SearchResult, Video};

pub const SEARCH_RESULT_KIND: &str = "youtube#searchResult";
pub const PLAYLIST_ITEM_KIND: &str = "youtube#playlistItem";

/// A video as seen by `search.list` or `playlistItems.list`.
#[derive(Debug, Clone, Default)]
pub struct VideoStub {
    pub video_id: String,
    /// Kind of the listing record this stub came from.
    pub listing_kind: String,
    pub etag: Option<String>,
    pub snippet: ListingSnippet,
}

impl VideoStub {
    #[must_use]
    pub fn from_search_result(result: SearchResult) -> Self {
        Self {
            video_id: result.id.video_id.unwrap_or_default(),
            listing_kind: result
                .kind
                .unwrap_or_else(|| SEARCH_RESULT_KIND.to_string()),
            etag: result.etag,
            snippet: result.snippet.unwrap_or_default(),
        }
    }

    /// Playlist items name the video twice; `contentDetails.videoId` wins.
    /// The item's `publishedAt` is when it joined the playlist, so the video's
    /// own publish time replaces it when present.
    #[must_use]
    pub fn from_playlist_item(item: PlaylistItem) -> Self {
        let mut snippet = item.snippet.unwrap_or_default();
        let from_resource = snippet
            .resource_id
            .as_ref()
            .and_then(|r| r.video_id.clone());
        let (from_details, video_published_at) = match item.content_details {
            Some(details) => (details.video_id, details.video_published_at),
            None => (None, None),
        };
        if video_published_at.is_some() {
            snippet.published_at = video_published_at;
        }
        // For uploads the item's channel is the owner; the owner fields are
        // only set for foreign videos in curated playlists.
        if snippet.video_owner_channel_id.is_some() {
            snippet.channel_id.clone_from(&snippet.video_owner_channel_id);
            snippet
                .channel_title
                .clone_from(&snippet.video_owner_channel_title);
        }
        Self {
            video_id: from_details.or(from_resource).unwrap_or_default(),
            listing_kind: item
                .kind
                .unwrap_or_else(|| PLAYLIST_ITEM_KIND.to_string()),
            etag: item.etag,
            snippet,
        }
    }
}

impl Keyed for VideoStub {
    fn key(&self) -> Option<&str> {
        Some(self.video_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl Keyed for Video {
    fn key(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

impl Keyed for Channel {
    fn key(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

impl Keyed for CommentThread {
    fn key(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_result_without_video_id_has_no_key() {
        let result: SearchResult = serde_json::from_value(json!({
            "kind": "youtube#searchResult",
            "id": { "kind": "youtube#channel", "channelId": "UC123" },
            "snippet": { "title": "A channel" }
        }))
        .unwrap();
        let stub = VideoStub::from_search_result(result);
        assert_eq!(stub.key(), None);
        assert_eq!(stub.snippet.title.as_deref(), Some("A channel"));
    }

    #[test]
    fn playlist_item_prefers_content_details_video_id_and_publish_time() {
        let item: PlaylistItem = serde_json::from_value(json!({
            "kind": "youtube#playlistItem",
            "id": "PLI1",
            "snippet": {
                "publishedAt": "2024-05-02T00:00:00Z",
                "channelId": "UCowner",
                "title": "Upload",
                "resourceId": { "kind": "youtube#video", "videoId": "fromResource" }
            },
            "contentDetails": {
                "videoId": "fromDetails",
                "videoPublishedAt": "2024-05-01T12:00:00Z"
            }
        }))
        .unwrap();
        let stub = VideoStub::from_playlist_item(item);
        assert_eq!(stub.key(), Some("fromDetails"));
        assert_eq!(stub.listing_kind, PLAYLIST_ITEM_KIND);
        assert_eq!(
            stub.snippet.published_at.as_deref(),
            Some("2024-05-01T12:00:00Z")
        );
        assert_eq!(stub.snippet.channel_id.as_deref(), Some("UCowner"));
    }

    #[test]
    fn playlist_item_falls_back_to_resource_id() {
        let item: PlaylistItem = serde_json::from_value(json!({
            "snippet": { "resourceId": { "videoId": "abc" } }
        }))
        .unwrap();
        assert_eq!(VideoStub::from_playlist_item(item).key(), Some("abc"));
    }
}
