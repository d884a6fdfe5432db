pub mod channel_ref;
pub mod client;
pub mod enrich;
pub mod entity;
pub mod error;
pub mod listing;
pub mod merge;
pub mod pagination;
pub mod pipeline;
pub mod rank;
pub mod types;

pub use channel_ref::{parse_channel_ref, ChannelRef};
pub use client::{SearchFilter, YoutubeClient, DEFAULT_BASE_URL};
pub use enrich::{enrich, DetailMap};
pub use entity::{ChannelEntity, CommentEntity, VideoEntity};
pub use error::YoutubeError;
pub use merge::{merge_channel, merge_comment, merge_video, parse_count};
pub use pagination::{walk_pages, IdentifierSet, Keyed, ListingPage, WalkOptions, WalkOutcome};
pub use pipeline::{
    collect_channel_videos, collect_comments, collect_search, ChannelVideosContext, Collection,
    CommentsContext, PipelineOptions, RunStats, SearchContext,
};
pub use rank::rank_and_trim;
