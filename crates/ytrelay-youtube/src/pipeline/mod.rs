//! The three collection pipelines: search, comments, and channel uploads.
//!
//! Each one walks a listing, enriches the identifiers it found, merges the
//! pieces into entities, ranks them, and trims to the requested count. Calls
//! are strictly sequential.

mod channel;
mod comments;
mod search;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ytrelay_core::{AppConfig, ShortPagePolicy};

use crate::entity::{ChannelEntity, VideoEntity};
use crate::pagination::{WalkOptions, MAX_PAGES};

pub use channel::collect_channel_videos;
pub use comments::collect_comments;
pub use search::collect_search;

/// Walker settings shared by every pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub short_page: ShortPagePolicy,
    pub inter_page_delay: Duration,
    pub max_pages: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            short_page: ShortPagePolicy::default(),
            inter_page_delay: Duration::ZERO,
            max_pages: MAX_PAGES,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            short_page: config.short_page_policy,
            inter_page_delay: Duration::from_millis(config.page_delay_ms),
            max_pages: MAX_PAGES,
        }
    }

    pub(crate) fn walk(&self, target_count: usize, page_limit: usize) -> WalkOptions {
        WalkOptions::new(target_count, page_limit)
            .with_short_page_policy(self.short_page)
            .with_inter_page_delay(self.inter_page_delay)
            .with_max_pages(self.max_pages)
    }
}

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub pages_fetched: usize,
    pub detail_batches: usize,
    pub duplicates_skipped: usize,
}

/// Ranked entities plus the mode-specific context they were collected for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<C, T> {
    pub context: C,
    pub items: Vec<T>,
    pub stats: RunStats,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchContext {
    pub query: String,
    pub order: String,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub requested: usize,
    pub returned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsContext {
    pub video: VideoEntity,
    pub requested: usize,
    pub returned: usize,
    pub comments_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelVideosContext {
    pub channel: ChannelEntity,
    pub requested: usize,
    pub returned: usize,
}
