use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// Which collection pipeline a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Comments,
    ChannelVideos,
}

impl Mode {
    /// Event type used when the run is triggered through a GitHub
    /// `repository_dispatch` event.
    #[must_use]
    pub fn dispatch_event_type(self) -> &'static str {
        match self {
            Mode::Search => "youtube-search",
            Mode::Comments => "youtube-comments",
            Mode::ChannelVideos => "youtube-channel-videos",
        }
    }

    /// Result count used when neither the command line nor the environment
    /// names one.
    #[must_use]
    pub fn default_count(self) -> u32 {
        match self {
            Mode::Comments => 50,
            Mode::Search | Mode::ChannelVideos => 25,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Search => write!(f, "search"),
            Mode::Comments => write!(f, "comments"),
            Mode::ChannelVideos => write!(f, "channel-videos"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(Mode::Search),
            "comments" => Ok(Mode::Comments),
            "channel-videos" | "channel_videos" | "channel" => Ok(Mode::ChannelVideos),
            other => Err(ConfigError::UnsupportedMode(other.to_owned())),
        }
    }
}

/// How the page walker treats a page that returned fewer items than asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortPagePolicy {
    /// Keep paging while the upstream hands back a continuation cursor.
    #[default]
    ContinueIfCursor,
    /// Treat a short page as the end of the stream.
    Stop,
}

impl FromStr for ShortPagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" | "continue-if-cursor" => Ok(ShortPagePolicy::ContinueIfCursor),
            "stop" => Ok(ShortPagePolicy::Stop),
            other => Err(format!("expected \"continue\" or \"stop\", got \"{other}\"")),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub proxy_url: Option<String>,
    pub delivery_delay_ms: u64,
    pub page_delay_ms: u64,
    pub short_page_policy: ShortPagePolicy,
    pub batch_size: usize,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub github_token: Option<String>,
    pub github_repository: Option<String>,
    pub github_api_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("proxy_url", &self.proxy_url.as_ref().map(|_| "[redacted]"))
            .field("delivery_delay_ms", &self.delivery_delay_ms)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("short_page_policy", &self.short_page_policy)
            .field("batch_size", &self.batch_size)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("github_repository", &self.github_repository)
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}
