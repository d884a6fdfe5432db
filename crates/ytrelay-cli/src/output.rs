//! Console summary and JSON artifact output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use ytrelay_core::Mode;
use ytrelay_youtube::{CommentEntity, VideoEntity};

use crate::relay::{Destination, RelayOutcome};

const MAX_TARGET_CHARS: usize = 50;
const MAX_LINE_TEXT_CHARS: usize = 60;

/// `youtube_<mode>_<target>_<unix ts>.json` under `dir`. The target is reduced
/// to characters that are safe in a file name.
pub(crate) fn artifact_path(
    dir: &Path,
    mode: Mode,
    target: &str,
    fetched_at: DateTime<Utc>,
) -> PathBuf {
    let slug: String = target
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_TARGET_CHARS)
        .collect();
    let mode = mode.to_string().replace('-', "_");
    dir.join(format!(
        "youtube_{mode}_{slug}_{}.json",
        fetched_at.timestamp()
    ))
}

/// Writes `value` as pretty-printed JSON, creating the parent directory.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub(crate) fn write_artifact<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", parent.display()))?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote collection artifact");
    Ok(())
}

pub(crate) fn video_lines(videos: &[VideoEntity], limit: usize) -> Vec<String> {
    videos
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, v)| {
            format!(
                "{}. {} | {} | {} views",
                i + 1,
                shorten(&v.snippet.title, MAX_LINE_TEXT_CHARS),
                v.channel.title,
                v.statistics.view_count
            )
        })
        .collect()
}

pub(crate) fn comment_lines(comments: &[CommentEntity], limit: usize) -> Vec<String> {
    comments
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}. {}: {} ({} likes)",
                i + 1,
                c.author_name,
                shorten(&c.text_original, MAX_LINE_TEXT_CHARS),
                c.like_count
            )
        })
        .collect()
}

fn shorten(text: &str, max: usize) -> String {
    let single_line = text.replace(['\r', '\n'], " ");
    match single_line.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &single_line[..idx]),
        None => single_line,
    }
}

pub(crate) fn print_outcome(outcome: &RelayOutcome) {
    let noun = match outcome.mode {
        Mode::Comments => "comments",
        Mode::Search | Mode::ChannelVideos => "videos",
    };
    println!(
        "collected {} {noun} ({} pages, {} detail batches, {} duplicates skipped)",
        outcome.returned,
        outcome.stats.pages_fetched,
        outcome.stats.detail_batches,
        outcome.stats.duplicates_skipped
    );
    if outcome.comments_disabled {
        println!("comments are disabled for this video");
    }
    if !outcome.top.is_empty() {
        println!();
        println!("Top {}:", outcome.top.len());
        for line in &outcome.top {
            println!("  {line}");
        }
        println!();
    }

    match &outcome.destination {
        Destination::Artifact(path) => println!("saved to {}", path.display()),
        Destination::Webhook(report) if report.succeeded() => println!(
            "delivered {} items in {} batches",
            report.delivered_items, report.delivered_batches
        ),
        Destination::Webhook(report) => {
            eprintln!(
                "warning: {} of {} batches failed to deliver ({} items delivered)",
                report.failures.len(),
                report.total_batches,
                report.delivered_items
            );
            for failure in &report.failures {
                eprintln!(
                    "  batch {} ({} items): {}",
                    failure.batch_number, failure.batch_size, failure.error
                );
            }
        }
    }
}
