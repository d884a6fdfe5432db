mod output;
mod relay;
mod trigger;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ytrelay_core::{JobOverrides, Mode, TransportConfig};

#[derive(Debug, Parser)]
#[command(name = "ytrelay-cli")]
#[command(about = "Collect YouTube videos or comments and relay them to a webhook")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search videos by keyword, ranked by view count.
    Search(JobArgs),
    /// Collect the comments of one video, ranked by like count.
    Comments(JobArgs),
    /// Collect a channel's uploads, ranked by view count.
    ChannelVideos(JobArgs),
    /// Trigger a remote run through a GitHub `repository_dispatch` event.
    Dispatch {
        #[arg(value_parser = parse_mode)]
        mode: Mode,
        /// Search query, video id, or channel reference.
        target: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_results: Option<u32>,
        #[arg(long)]
        webhook_url: Option<String>,
        #[command(flatten)]
        window: PublishWindow,
    },
}

/// Search-only publish date window, inclusive, as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default, Args)]
struct PublishWindow {
    #[arg(long, value_parser = ytrelay_core::parse_date_arg)]
    published_after: Option<NaiveDate>,
    #[arg(long, value_parser = ytrelay_core::parse_date_arg)]
    published_before: Option<NaiveDate>,
}

/// Positional job arguments. Anything omitted falls back to the environment.
#[derive(Debug, Clone, Default, Args)]
struct JobArgs {
    /// Search query, video id, or channel id / @handle / URL.
    target: Option<String>,
    /// Number of results to collect.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,
    webhook_url: Option<String>,
    api_key: Option<String>,
    /// Items per webhook delivery batch.
    #[arg(long, value_parser = parse_batch_size)]
    batch_size: Option<usize>,
    #[command(flatten)]
    window: PublishWindow,
}

impl JobArgs {
    fn overrides(&self, mode: Option<Mode>) -> JobOverrides {
        JobOverrides {
            mode,
            target: self.target.clone(),
            count: self.count,
            webhook_url: self.webhook_url.clone(),
            api_key: self.api_key.clone(),
            published_after: self.window.published_after,
            published_before: self.window.published_before,
        }
    }
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    raw.parse::<Mode>().map_err(|e| e.to_string())
}

fn parse_batch_size(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid batch size \"{raw}\": {e}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = ytrelay_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let http = ytrelay_core::build_http_client(&TransportConfig::from_app_config(&config))?;

    let (mode, args) = match cli.command {
        Some(Commands::Dispatch {
            mode,
            target,
            max_results,
            webhook_url,
            window,
        }) => {
            return trigger::run_dispatch(
                &http,
                &config,
                mode,
                &target,
                max_results,
                webhook_url.as_deref(),
                (window.published_after, window.published_before),
            )
            .await;
        }
        Some(Commands::Search(args)) => (Some(Mode::Search), args),
        Some(Commands::Comments(args)) => (Some(Mode::Comments), args),
        Some(Commands::ChannelVideos(args)) => (Some(Mode::ChannelVideos), args),
        None => (None, JobArgs::default()),
    };

    let job = ytrelay_core::load_job_config(&args.overrides(mode))?;
    let batch_size = args.batch_size.unwrap_or(config.batch_size);
    tracing::info!(?job, batch_size, "starting relay job");

    let outcome = relay::run_job(&http, &config, &job, batch_size).await?;
    output::print_outcome(&outcome);

    Ok(())
}

#[cfg(test)]
mod tests;
