use std::collections::HashMap;

use chrono::Utc;

use crate::channel_ref::parse_channel_ref;
use crate::client::{YoutubeClient, DETAIL_BATCH_MAX, LISTING_PAGE_LIMIT};
use crate::enrich::{batch_count, enrich};
use crate::entity::{ListingMetadata, VideoEntity};
use crate::error::YoutubeError;
use crate::listing::VideoStub;
use crate::merge::{merge_channel, merge_video};
use crate::pagination::{walk_pages, ListingPage};
use crate::rank::{by_view_count, rank_and_trim};

use super::{ChannelVideosContext, Collection, PipelineOptions, RunStats};

/// Collects up to `count` uploads of a channel, most viewed first.
///
/// `channel` may be a channel id, an `@handle`, or a youtube.com channel URL.
/// Only the first `count` uploads (newest first) are listed; ranking then
/// reorders those by views.
///
/// # Errors
///
/// - [`YoutubeError::InvalidChannelReference`] if `channel` cannot be parsed.
/// - [`YoutubeError::NotFound`] if no such channel exists.
/// - [`YoutubeError::NoUploadsPlaylist`] if the channel exposes no uploads.
/// - [`YoutubeError::Listing`] / [`YoutubeError::BatchDetail`] on upstream
///   failures while paging or enriching.
pub async fn collect_channel_videos(
    client: &YoutubeClient,
    channel: &str,
    count: usize,
    options: &PipelineOptions,
) -> Result<Collection<ChannelVideosContext, VideoEntity>, YoutubeError> {
    let fetched_at = Utc::now();
    let reference = parse_channel_ref(channel)?;
    tracing::info!(channel = %reference, count, "collecting channel uploads");

    let resolved = client.resolve_channel(&reference).await?;
    let channel_id = resolved.id.clone();
    let uploads = resolved
        .uploads_playlist_id()
        .map(str::to_owned)
        .ok_or_else(|| YoutubeError::NoUploadsPlaylist {
            channel_id: channel_id.clone(),
        })?;
    let channels = HashMap::from([(channel_id.clone(), resolved)]);
    tracing::debug!(channel_id = %channel_id, uploads = %uploads, "resolved uploads playlist");

    let uploads_ref = uploads.as_str();
    let walked = walk_pages(
        &options.walk(count, LISTING_PAGE_LIMIT),
        |cursor, want| async move {
            let page = client
                .playlist_items_page(uploads_ref, want, cursor.as_deref())
                .await?;
            Ok::<_, YoutubeError>(ListingPage::new(
                page.items
                    .into_iter()
                    .map(VideoStub::from_playlist_item)
                    .collect(),
                page.next_page_token,
            ))
        },
    )
    .await?;

    let videos = enrich(walked.ids.as_slice(), DETAIL_BATCH_MAX, |batch| {
        client.videos(batch)
    })
    .await?;

    let entities: Vec<VideoEntity> = walked
        .items
        .iter()
        .enumerate()
        .map(|(index, stub)| {
            let mut entity = merge_video(
                stub,
                &videos,
                &channels,
                ListingMetadata {
                    source: channel_id.clone(),
                    result_index: index + 1,
                    fetched_at,
                    listing_kind: stub.listing_kind.clone(),
                },
            );
            // Uploads always belong to the channel, even when a video's own
            // detail record is missing.
            if entity.channel.channel_id.is_empty() {
                entity.channel = merge_channel(&channel_id, &channels);
            }
            entity
        })
        .collect();

    let items = rank_and_trim(entities, by_view_count, count);
    let stats = RunStats {
        pages_fetched: walked.pages_fetched,
        detail_batches: batch_count(walked.ids.len(), DETAIL_BATCH_MAX),
        duplicates_skipped: walked.duplicates_skipped,
    };
    tracing::info!(
        channel_id = %channel_id,
        returned = items.len(),
        pages = stats.pages_fetched,
        detail_batches = stats.detail_batches,
        "channel collection complete"
    );

    Ok(Collection {
        context: ChannelVideosContext {
            channel: merge_channel(&channel_id, &channels),
            requested: count,
            returned: items.len(),
        },
        items,
        stats,
        fetched_at,
    })
}
