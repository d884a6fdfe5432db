//! Fixed-schema output records.
//!
//! Every field is always present once serialized: strings default to `""`,
//! lists to `[]`, objects to `{}`, counts to `0`, and flags to `false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoEntity {
    pub basic_info: VideoBasicInfo,
    pub snippet: VideoSnippetInfo,
    pub statistics: VideoStatisticsInfo,
    pub content_details: VideoContentInfo,
    pub status: VideoStatusInfo,
    pub thumbnails: ThumbnailSet,
    pub recording_details: RecordingInfo,
    pub topic_details: TopicInfo,
    pub channel: ChannelEntity,
    pub listing_metadata: ListingMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoBasicInfo {
    pub kind: String,
    pub etag: String,
    pub video_id: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoSnippetInfo {
    pub published_at: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub live_broadcast_content: String,
    pub default_language: String,
    pub default_audio_language: String,
    pub localized: Map<String, Value>,
    pub publish_time: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatisticsInfo {
    pub view_count: u64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub comment_count: u64,
    pub favorite_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoContentInfo {
    pub duration: String,
    pub dimension: String,
    pub definition: String,
    pub caption: String,
    pub licensed_content: bool,
    pub region_restriction: Map<String, Value>,
    pub content_rating: Map<String, Value>,
    pub projection: String,
    pub has_custom_thumbnail: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStatusInfo {
    pub upload_status: String,
    pub failure_reason: String,
    pub rejection_reason: String,
    pub privacy_status: String,
    pub publish_at: String,
    pub license: String,
    pub embeddable: bool,
    pub public_stats_viewable: bool,
    pub made_for_kids: bool,
    pub self_declared_made_for_kids: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSet {
    pub default: ThumbnailInfo,
    pub medium: ThumbnailInfo,
    pub high: ThumbnailInfo,
    pub standard: ThumbnailInfo,
    pub maxres: ThumbnailInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailInfo {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub location_description: String,
    pub location: Map<String, Value>,
    pub recording_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub topic_ids: Vec<String>,
    pub relevant_topic_ids: Vec<String>,
    pub topic_categories: Vec<String>,
}

/// Where and when a video entity was listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingMetadata {
    /// Search query or channel id the listing was run for.
    pub source: String,
    /// 1-based position in the upstream listing, before ranking.
    pub result_index: usize,
    pub fetched_at: DateTime<Utc>,
    pub listing_kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntity {
    pub channel_id: String,
    pub channel_url: String,
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub published_at: String,
    pub country: String,
    pub thumbnails: ThumbnailSet,
    pub statistics: ChannelStatisticsInfo,
    pub hidden_subscriber_count: bool,
    pub uploads_playlist_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatisticsInfo {
    pub view_count: u64,
    pub subscriber_count: u64,
    pub video_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntity {
    pub comment_id: String,
    pub author_name: String,
    pub author_channel_id: String,
    pub author_profile_image: String,
    pub text: String,
    pub text_original: String,
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
    pub reply_count: u64,
    pub parent_id: String,
    pub can_reply: bool,
    pub replies: Vec<CommentReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReply {
    pub comment_id: String,
    pub author_name: String,
    pub author_channel_id: String,
    pub author_profile_image: String,
    pub text: String,
    pub text_original: String,
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
    pub parent_id: String,
}

#[must_use]
pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[must_use]
pub fn channel_url(channel_id: &str) -> String {
    if channel_id.is_empty() {
        return String::new();
    }
    format!("https://www.youtube.com/channel/{channel_id}")
}
