//! Runs one relay job: collect with the pipeline for the job's mode, then
//! either deliver the collection to the webhook in batches or write it to a
//! JSON artifact.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use ytrelay_core::{AppConfig, JobConfig, Mode};
use ytrelay_webhook::{deliver, DeliveryEnvelope, DeliveryReport, WebhookClient};
use ytrelay_youtube::{
    collect_channel_videos, collect_comments, collect_search, Collection, PipelineOptions,
    RunStats, SearchFilter, YoutubeClient,
};

use crate::output;

/// Where the collection ended up.
#[derive(Debug)]
pub(crate) enum Destination {
    Webhook(DeliveryReport),
    Artifact(PathBuf),
}

#[derive(Debug)]
pub(crate) struct RelayOutcome {
    pub mode: Mode,
    pub returned: usize,
    pub stats: RunStats,
    pub comments_disabled: bool,
    /// Pre-rendered summary lines for the highest-ranked items.
    pub top: Vec<String>,
    pub destination: Destination,
}

/// Number of ranked items echoed to the console after a run.
const SUMMARY_LEN: usize = 5;

/// Collect and publish one job.
///
/// # Errors
///
/// Returns an error if the YouTube client or webhook URL is invalid, the
/// pipeline fails, or the artifact cannot be written. Individual webhook
/// batch failures are not errors; they are recorded in the outcome.
pub(crate) async fn run_job(
    http: &Client,
    config: &AppConfig,
    job: &JobConfig,
    batch_size: usize,
) -> anyhow::Result<RelayOutcome> {
    let youtube = YoutubeClient::new(http.clone(), &job.api_key, &config.api_base_url)?;
    let options = PipelineOptions::from_app_config(config);
    let count = usize::try_from(job.count)?;
    let publisher = Publisher {
        http,
        config,
        job,
        batch_size,
    };

    match job.mode {
        Mode::Search => {
            let filter = SearchFilter::from_dates(job.published_after, job.published_before);
            let collection =
                collect_search(&youtube, &job.target, &filter, count, &options).await?;
            let top = output::video_lines(&collection.items, SUMMARY_LEN);
            publisher.publish(&collection, top, false).await
        }
        Mode::Comments => {
            let collection = collect_comments(&youtube, &job.target, count, &options).await?;
            let disabled = collection.context.comments_disabled;
            let top = output::comment_lines(&collection.items, SUMMARY_LEN);
            publisher.publish(&collection, top, disabled).await
        }
        Mode::ChannelVideos => {
            let collection =
                collect_channel_videos(&youtube, &job.target, count, &options).await?;
            let top = output::video_lines(&collection.items, SUMMARY_LEN);
            publisher.publish(&collection, top, false).await
        }
    }
}

struct Publisher<'a> {
    http: &'a Client,
    config: &'a AppConfig,
    job: &'a JobConfig,
    batch_size: usize,
}

impl Publisher<'_> {
    async fn publish<C, T>(
        &self,
        collection: &Collection<C, T>,
        top: Vec<String>,
        comments_disabled: bool,
    ) -> anyhow::Result<RelayOutcome>
    where
        C: Serialize,
        T: Serialize,
    {
        let destination = match self.job.webhook_url.as_deref() {
            Some(url) => {
                let webhook = WebhookClient::new(self.http.clone(), url)?;
                let delay = Duration::from_millis(self.config.delivery_delay_ms);
                let report = deliver(&collection.items, self.batch_size, delay, |batch| {
                    let envelope =
                        DeliveryEnvelope::new(batch, &collection.context, collection.fetched_at);
                    let webhook = &webhook;
                    async move { webhook.post_json(&envelope).await }
                })
                .await;
                Destination::Webhook(report)
            }
            None => {
                let path = output::artifact_path(
                    &self.config.output_dir,
                    self.job.mode,
                    &self.job.target,
                    collection.fetched_at,
                );
                output::write_artifact(&path, collection)?;
                Destination::Artifact(path)
            }
        };

        Ok(RelayOutcome {
            mode: self.job.mode,
            returned: collection.items.len(),
            stats: collection.stats,
            comments_disabled,
            top,
            destination,
        })
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
