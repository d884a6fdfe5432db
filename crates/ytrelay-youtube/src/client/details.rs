//! Batch detail lookups (`videos.list`, `channels.list`) and channel
//! reference resolution.

use crate::channel_ref::ChannelRef;
use crate::error::YoutubeError;
use crate::types::{Channel, ListResponse, Video};

use super::{YoutubeClient, DETAIL_BATCH_MAX};

pub const VIDEO_PARTS: &str =
    "snippet,statistics,contentDetails,status,recordingDetails,topicDetails";
pub const CHANNEL_PARTS: &str = "snippet,statistics,contentDetails";

impl YoutubeClient {
    /// Full video records for up to [`DETAIL_BATCH_MAX`] ids.
    ///
    /// Ids the API does not know (deleted, private) are simply absent from
    /// the result.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] when the API rejects the call.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body has an unexpected shape.
    pub async fn videos(&self, ids: &[String]) -> Result<Vec<Video>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug_assert!(ids.len() <= DETAIL_BATCH_MAX);
        let joined = ids.join(",");
        let response: ListResponse<Video> = self
            .get_json(
                "videos",
                &[
                    ("part", VIDEO_PARTS),
                    ("id", joined.as_str()),
                    ("maxResults", "50"),
                ],
            )
            .await?;
        Ok(response.items)
    }

    /// Channel records for up to [`DETAIL_BATCH_MAX`] ids.
    ///
    /// # Errors
    ///
    /// Same as [`Self::videos`].
    pub async fn channels(&self, ids: &[String]) -> Result<Vec<Channel>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug_assert!(ids.len() <= DETAIL_BATCH_MAX);
        let joined = ids.join(",");
        let response: ListResponse<Channel> = self
            .get_json(
                "channels",
                &[
                    ("part", CHANNEL_PARTS),
                    ("id", joined.as_str()),
                    ("maxResults", "50"),
                ],
            )
            .await?;
        Ok(response.items)
    }

    /// Looks up a single channel by id, `@handle`, or legacy username.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if the API returns no channel.
    /// - Anything [`Self::videos`] can return.
    pub async fn resolve_channel(&self, reference: &ChannelRef) -> Result<Channel, YoutubeError> {
        let (filter, value) = match reference {
            ChannelRef::Id(id) => ("id", id.as_str()),
            ChannelRef::Handle(handle) => ("forHandle", handle.as_str()),
            ChannelRef::Username(name) => ("forUsername", name.as_str()),
        };
        let response: ListResponse<Channel> = self
            .get_json("channels", &[("part", CHANNEL_PARTS), (filter, value)])
            .await?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::NotFound {
                resource: "channel",
                id: reference.to_string(),
            })
    }
}
