use chrono::Utc;

use crate::client::{SearchFilter, YoutubeClient, DETAIL_BATCH_MAX, LISTING_PAGE_LIMIT};
use crate::enrich::{batch_count, enrich};
use crate::entity::{ListingMetadata, VideoEntity};
use crate::error::YoutubeError;
use crate::listing::VideoStub;
use crate::merge::merge_video;
use crate::pagination::{walk_pages, IdentifierSet, ListingPage};
use crate::rank::{by_view_count, rank_and_trim};

use super::{Collection, PipelineOptions, RunStats, SearchContext};

/// Collects up to `count` videos matching `query`, most viewed first. Only
/// videos published inside `filter`'s window are listed.
///
/// # Errors
///
/// Returns [`YoutubeError::Listing`] if a search page fails and
/// [`YoutubeError::BatchDetail`] if a video or channel lookup fails.
pub async fn collect_search(
    client: &YoutubeClient,
    query: &str,
    filter: &SearchFilter,
    count: usize,
    options: &PipelineOptions,
) -> Result<Collection<SearchContext, VideoEntity>, YoutubeError> {
    let fetched_at = Utc::now();
    tracing::info!(query, count, ?filter, "collecting search results");

    let walked = walk_pages(
        &options.walk(count, LISTING_PAGE_LIMIT),
        |cursor, want| async move {
            let page = client
                .search_page(query, filter, want, cursor.as_deref())
                .await?;
            Ok::<_, YoutubeError>(ListingPage::new(
                page.items
                    .into_iter()
                    .map(VideoStub::from_search_result)
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

    let channel_ids: IdentifierSet = walked
        .ids
        .iter()
        .filter_map(|id| videos.get(id))
        .filter_map(|v| v.snippet.as_ref()?.channel_id.as_deref())
        .chain(
            walked
                .items
                .iter()
                .filter_map(|stub| stub.snippet.channel_id.as_deref()),
        )
        .filter(|id| !id.is_empty())
        .collect();

    let channels = enrich(channel_ids.as_slice(), DETAIL_BATCH_MAX, |batch| {
        client.channels(batch)
    })
    .await?;

    let entities: Vec<VideoEntity> = walked
        .items
        .iter()
        .enumerate()
        .map(|(index, stub)| {
            merge_video(
                stub,
                &videos,
                &channels,
                ListingMetadata {
                    source: query.to_owned(),
                    result_index: index + 1,
                    fetched_at,
                    listing_kind: stub.listing_kind.clone(),
                },
            )
        })
        .collect();

    let items = rank_and_trim(entities, by_view_count, count);
    let stats = RunStats {
        pages_fetched: walked.pages_fetched,
        detail_batches: batch_count(walked.ids.len(), DETAIL_BATCH_MAX)
            + batch_count(channel_ids.len(), DETAIL_BATCH_MAX),
        duplicates_skipped: walked.duplicates_skipped,
    };
    tracing::info!(
        query,
        returned = items.len(),
        pages = stats.pages_fetched,
        detail_batches = stats.detail_batches,
        "search collection complete"
    );

    Ok(Collection {
        context: SearchContext {
            query: query.to_owned(),
            order: "viewCount".to_string(),
            published_after: filter.published_after,
            published_before: filter.published_before,
            requested: count,
            returned: items.len(),
        },
        items,
        stats,
        fetched_at,
    })
}
