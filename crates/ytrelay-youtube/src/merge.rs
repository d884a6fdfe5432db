//! Merging of listing stubs and detail records into fixed-schema entities.
//!
//! Field precedence: the detail record looked up by id, then the listing stub
//! for fields the listing also carries, then the type default. Nothing here
//! can fail; malformed or missing values fall back to defaults.

use serde_json::{Map, Value};

use crate::entity::{
    channel_url, video_url, ChannelEntity, ChannelStatisticsInfo, CommentEntity, CommentReply,
    ListingMetadata, RecordingInfo, ThumbnailInfo, ThumbnailSet, TopicInfo, VideoBasicInfo,
    VideoContentInfo, VideoEntity, VideoSnippetInfo, VideoStatisticsInfo, VideoStatusInfo,
};
use crate::enrich::DetailMap;
use crate::listing::VideoStub;
use crate::types::{Channel, Comment, CommentThread, Thumbnail, Thumbnails, Video};

/// Parses an API count.
///
/// Accepts a string of ASCII digits or a non-negative JSON integer. Anything
/// else (missing, empty, signed, fractional, overflowing, non-numeric) is 0.
#[must_use]
pub fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().unwrap_or(0)
        }
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// First candidate that is present and non-empty.
fn first_text(candidates: &[Option<&String>]) -> String {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default()
}

fn object(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

fn thumbnail(thumb: Option<&Thumbnail>) -> ThumbnailInfo {
    thumb.map_or_else(ThumbnailInfo::default, |t| ThumbnailInfo {
        url: text(t.url.as_ref()),
        width: t.width.unwrap_or(0),
        height: t.height.unwrap_or(0),
    })
}

fn thumbnail_set(thumbs: Option<&Thumbnails>) -> ThumbnailSet {
    let Some(t) = thumbs else {
        return ThumbnailSet::default();
    };
    ThumbnailSet {
        default: thumbnail(t.default.as_ref()),
        medium: thumbnail(t.medium.as_ref()),
        high: thumbnail(t.high.as_ref()),
        standard: thumbnail(t.standard.as_ref()),
        maxres: thumbnail(t.maxres.as_ref()),
    }
}

/// Builds the channel entity for `channel_id` from `channels`.
///
/// An id missing from the map yields an entity with only `channel_id` and
/// `channel_url` set.
#[must_use]
pub fn merge_channel(channel_id: &str, channels: &DetailMap<Channel>) -> ChannelEntity {
    let mut entity = ChannelEntity {
        channel_id: channel_id.to_owned(),
        channel_url: channel_url(channel_id),
        ..ChannelEntity::default()
    };
    let Some(channel) = channels.get(channel_id) else {
        return entity;
    };

    if let Some(snippet) = &channel.snippet {
        entity.title = text(snippet.title.as_ref());
        entity.description = text(snippet.description.as_ref());
        entity.custom_url = text(snippet.custom_url.as_ref());
        entity.published_at = text(snippet.published_at.as_ref());
        entity.country = text(snippet.country.as_ref());
        entity.thumbnails = thumbnail_set(snippet.thumbnails.as_ref());
    }
    if let Some(stats) = &channel.statistics {
        entity.statistics = ChannelStatisticsInfo {
            view_count: parse_count(stats.view_count.as_ref()),
            subscriber_count: parse_count(stats.subscriber_count.as_ref()),
            video_count: parse_count(stats.video_count.as_ref()),
        };
        entity.hidden_subscriber_count = stats.hidden_subscriber_count.unwrap_or(false);
    }
    entity.uploads_playlist_id = channel
        .uploads_playlist_id()
        .map(str::to_owned)
        .unwrap_or_default();
    entity
}

/// Builds a video entity from its listing stub, the video detail map, and
/// the channel detail map.
#[must_use]
pub fn merge_video(
    stub: &VideoStub,
    videos: &DetailMap<Video>,
    channels: &DetailMap<Channel>,
    listing: ListingMetadata,
) -> VideoEntity {
    let detail = videos.get(&stub.video_id);
    let listed = &stub.snippet;
    let snippet = detail.and_then(|v| v.snippet.as_ref());
    let stats = detail.and_then(|v| v.statistics.as_ref());
    let content = detail.and_then(|v| v.content_details.as_ref());
    let status = detail.and_then(|v| v.status.as_ref());
    let recording = detail.and_then(|v| v.recording_details.as_ref());
    let topics = detail.and_then(|v| v.topic_details.as_ref());

    let channel_id = first_text(&[
        snippet.and_then(|s| s.channel_id.as_ref()),
        listed.channel_id.as_ref(),
    ]);
    let channel_title = first_text(&[
        snippet.and_then(|s| s.channel_title.as_ref()),
        listed.channel_title.as_ref(),
    ]);

    let mut channel = merge_channel(&channel_id, channels);
    if channel.title.is_empty() {
        channel.title.clone_from(&channel_title);
    }

    VideoEntity {
        basic_info: VideoBasicInfo {
            kind: detail
                .and_then(|v| v.kind.clone())
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| "youtube#video".to_string()),
            etag: first_text(&[detail.and_then(|v| v.etag.as_ref()), stub.etag.as_ref()]),
            video_id: stub.video_id.clone(),
            video_url: video_url(&stub.video_id),
        },
        snippet: VideoSnippetInfo {
            published_at: first_text(&[
                snippet.and_then(|s| s.published_at.as_ref()),
                listed.published_at.as_ref(),
            ]),
            channel_id,
            title: first_text(&[snippet.and_then(|s| s.title.as_ref()), listed.title.as_ref()]),
            description: first_text(&[
                snippet.and_then(|s| s.description.as_ref()),
                listed.description.as_ref(),
            ]),
            channel_title,
            tags: snippet.map(|s| s.tags.clone()).unwrap_or_default(),
            category_id: text(snippet.and_then(|s| s.category_id.as_ref())),
            live_broadcast_content: first_text(&[
                snippet.and_then(|s| s.live_broadcast_content.as_ref()),
                listed.live_broadcast_content.as_ref(),
            ]),
            default_language: text(snippet.and_then(|s| s.default_language.as_ref())),
            default_audio_language: text(snippet.and_then(|s| s.default_audio_language.as_ref())),
            localized: object(snippet.and_then(|s| s.localized.as_ref())),
            publish_time: first_text(&[
                listed.publish_time.as_ref(),
                listed.published_at.as_ref(),
            ]),
        },
        statistics: VideoStatisticsInfo {
            view_count: parse_count(stats.and_then(|s| s.view_count.as_ref())),
            like_count: parse_count(stats.and_then(|s| s.like_count.as_ref())),
            dislike_count: parse_count(stats.and_then(|s| s.dislike_count.as_ref())),
            comment_count: parse_count(stats.and_then(|s| s.comment_count.as_ref())),
            favorite_count: parse_count(stats.and_then(|s| s.favorite_count.as_ref())),
        },
        content_details: VideoContentInfo {
            duration: text(content.and_then(|c| c.duration.as_ref())),
            dimension: text(content.and_then(|c| c.dimension.as_ref())),
            definition: text(content.and_then(|c| c.definition.as_ref())),
            caption: text(content.and_then(|c| c.caption.as_ref())),
            licensed_content: content.and_then(|c| c.licensed_content).unwrap_or(false),
            region_restriction: object(content.and_then(|c| c.region_restriction.as_ref())),
            content_rating: object(content.and_then(|c| c.content_rating.as_ref())),
            projection: text(content.and_then(|c| c.projection.as_ref())),
            has_custom_thumbnail: content.and_then(|c| c.has_custom_thumbnail).unwrap_or(false),
        },
        status: VideoStatusInfo {
            upload_status: text(status.and_then(|s| s.upload_status.as_ref())),
            failure_reason: text(status.and_then(|s| s.failure_reason.as_ref())),
            rejection_reason: text(status.and_then(|s| s.rejection_reason.as_ref())),
            privacy_status: text(status.and_then(|s| s.privacy_status.as_ref())),
            publish_at: text(status.and_then(|s| s.publish_at.as_ref())),
            license: text(status.and_then(|s| s.license.as_ref())),
            embeddable: status.and_then(|s| s.embeddable).unwrap_or(false),
            public_stats_viewable: status.and_then(|s| s.public_stats_viewable).unwrap_or(false),
            made_for_kids: status.and_then(|s| s.made_for_kids).unwrap_or(false),
            self_declared_made_for_kids: status
                .and_then(|s| s.self_declared_made_for_kids)
                .unwrap_or(false),
        },
        thumbnails: thumbnail_set(
            snippet
                .and_then(|s| s.thumbnails.as_ref())
                .or(listed.thumbnails.as_ref()),
        ),
        recording_details: RecordingInfo {
            location_description: text(recording.and_then(|r| r.location_description.as_ref())),
            location: object(recording.and_then(|r| r.location.as_ref())),
            recording_date: text(recording.and_then(|r| r.recording_date.as_ref())),
        },
        topic_details: topics.map_or_else(TopicInfo::default, |t| TopicInfo {
            topic_ids: t.topic_ids.clone(),
            relevant_topic_ids: t.relevant_topic_ids.clone(),
            topic_categories: t.topic_categories.clone(),
        }),
        channel,
        listing_metadata: listing,
    }
}

fn reply(comment: &Comment) -> CommentReply {
    let snippet = comment.snippet.as_ref();
    CommentReply {
        comment_id: text(comment.id.as_ref()),
        author_name: text(snippet.and_then(|s| s.author_display_name.as_ref())),
        author_channel_id: text(
            snippet
                .and_then(|s| s.author_channel_id.as_ref())
                .and_then(|a| a.value.as_ref()),
        ),
        author_profile_image: text(snippet.and_then(|s| s.author_profile_image_url.as_ref())),
        text: text(snippet.and_then(|s| s.text_display.as_ref())),
        text_original: text(snippet.and_then(|s| s.text_original.as_ref())),
        like_count: parse_count(snippet.and_then(|s| s.like_count.as_ref())),
        published_at: text(snippet.and_then(|s| s.published_at.as_ref())),
        updated_at: text(snippet.and_then(|s| s.updated_at.as_ref())),
        parent_id: text(snippet.and_then(|s| s.parent_id.as_ref())),
    }
}

/// Builds a comment entity from a thread: the top-level comment plus any
/// replies the API returned inline.
#[must_use]
pub fn merge_comment(thread: &CommentThread) -> CommentEntity {
    let thread_snippet = thread.snippet.as_ref();
    let top = thread_snippet
        .and_then(|s| s.top_level_comment.as_ref())
        .map(reply)
        .unwrap_or_default();
    let replies: Vec<CommentReply> = thread
        .replies
        .as_ref()
        .map(|r| r.comments.iter().map(reply).collect())
        .unwrap_or_default();

    CommentEntity {
        comment_id: thread.id.clone(),
        author_name: top.author_name,
        author_channel_id: top.author_channel_id,
        author_profile_image: top.author_profile_image,
        text: top.text,
        text_original: top.text_original,
        like_count: top.like_count,
        published_at: top.published_at,
        updated_at: top.updated_at,
        reply_count: parse_count(thread_snippet.and_then(|s| s.total_reply_count.as_ref())),
        parent_id: top.parent_id,
        can_reply: thread_snippet.and_then(|s| s.can_reply).unwrap_or(false),
        replies,
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
