use std::collections::HashMap;

use chrono::Utc;

use crate::client::{YoutubeClient, COMMENT_PAGE_LIMIT, DETAIL_BATCH_MAX};
use crate::enrich::batch_count;
use crate::entity::{CommentEntity, ListingMetadata};
use crate::error::YoutubeError;
use crate::listing::VideoStub;
use crate::merge::{merge_comment, merge_video};
use crate::pagination::{walk_pages, IdentifierSet, ListingPage, WalkOutcome};
use crate::rank::{by_like_count, rank_and_trim};
use crate::types::ListingSnippet;

use super::{Collection, CommentsContext, PipelineOptions, RunStats};

/// Collects up to `count` top-level comments on `video_id`, most liked first.
///
/// A video with comments turned off is not an error: the collection comes
/// back empty with `comments_disabled` set.
///
/// # Errors
///
/// - [`YoutubeError::NotFound`] if the video does not exist.
/// - [`YoutubeError::Listing`] if a comment page fails for any other reason.
pub async fn collect_comments(
    client: &YoutubeClient,
    video_id: &str,
    count: usize,
    options: &PipelineOptions,
) -> Result<Collection<CommentsContext, CommentEntity>, YoutubeError> {
    let fetched_at = Utc::now();
    tracing::info!(video_id, count, "collecting comments");

    let parent_ids = [video_id.to_owned()];
    let video = client
        .videos(&parent_ids)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| YoutubeError::NotFound {
            resource: "video",
            id: video_id.to_owned(),
        })?;

    let stub = VideoStub {
        video_id: video.id.clone(),
        listing_kind: video
            .kind
            .clone()
            .unwrap_or_else(|| "youtube#video".to_string()),
        etag: video.etag.clone(),
        snippet: ListingSnippet::default(),
    };
    let videos = HashMap::from([(video.id.clone(), video)]);
    let video_entity = merge_video(
        &stub,
        &videos,
        &HashMap::new(),
        ListingMetadata {
            source: video_id.to_owned(),
            result_index: 1,
            fetched_at,
            listing_kind: stub.listing_kind.clone(),
        },
    );

    let walked = walk_pages(
        &options.walk(count, COMMENT_PAGE_LIMIT),
        |cursor, want| async move {
            let page = client
                .comment_threads_page(video_id, want, cursor.as_deref())
                .await?;
            Ok::<_, YoutubeError>(ListingPage::new(page.items, page.next_page_token))
        },
    )
    .await;

    let (walked, comments_disabled) = match walked {
        Ok(walked) => (walked, false),
        Err(e) if e.is_comments_disabled() => {
            tracing::warn!(video_id, "comments are disabled for this video");
            (
                WalkOutcome {
                    items: Vec::new(),
                    ids: IdentifierSet::new(),
                    pages_fetched: e.pages_before_failure().unwrap_or(0),
                    duplicates_skipped: 0,
                },
                true,
            )
        }
        Err(e) => return Err(e),
    };

    let entities: Vec<CommentEntity> = walked.items.iter().map(merge_comment).collect();
    let items = rank_and_trim(entities, by_like_count, count);
    let stats = RunStats {
        pages_fetched: walked.pages_fetched,
        detail_batches: batch_count(parent_ids.len(), DETAIL_BATCH_MAX),
        duplicates_skipped: walked.duplicates_skipped,
    };
    tracing::info!(
        video_id,
        returned = items.len(),
        pages = stats.pages_fetched,
        "comment collection complete"
    );

    Ok(Collection {
        context: CommentsContext {
            video: video_entity,
            requested: count,
            returned: items.len(),
            comments_disabled,
        },
        items,
        stats,
        fetched_at,
    })
}
