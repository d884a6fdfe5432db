use std::path::PathBuf;

use ytrelay_core::{AppConfig, ShortPagePolicy};

use super::*;

/// Configuration pointing the YouTube client at `api_base_url` with no
/// delivery delay.
pub(crate) fn test_config(api_base_url: &str, output_dir: PathBuf) -> AppConfig {
    AppConfig {
        api_base_url: api_base_url.to_string(),
        request_timeout_secs: 5,
        user_agent: "ytrelay-test/0.1".to_string(),
        proxy_url: None,
        delivery_delay_ms: 0,
        page_delay_ms: 0,
        short_page_policy: ShortPagePolicy::ContinueIfCursor,
        batch_size: 100,
        output_dir,
        log_level: "info".to_string(),
        github_token: None,
        github_repository: None,
        github_api_url: "https://api.github.com".to_string(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["ytrelay-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_search_with_all_positionals() {
    let cli = Cli::try_parse_from([
        "ytrelay-cli",
        "search",
        "HONOR 400",
        "75",
        "https://hooks.example.com/in",
        "key-123",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    let overrides = args.overrides(Some(Mode::Search));
    assert_eq!(overrides.mode, Some(Mode::Search));
    assert_eq!(overrides.target.as_deref(), Some("HONOR 400"));
    assert_eq!(overrides.count, Some(75));
    assert_eq!(
        overrides.webhook_url.as_deref(),
        Some("https://hooks.example.com/in")
    );
    assert_eq!(overrides.api_key.as_deref(), Some("key-123"));
    assert!(args.batch_size.is_none());
}

#[test]
fn search_positionals_are_optional() {
    let cli = Cli::try_parse_from(["ytrelay-cli", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search(JobArgs {
            target: None,
            count: None,
            webhook_url: None,
            api_key: None,
            batch_size: None,
            window: PublishWindow {
                published_after: None,
                published_before: None,
            },
        }))
    ));
}

#[test]
fn parses_comments_with_count() {
    let cli = Cli::try_parse_from(["ytrelay-cli", "comments", "dQw4w9WgXcQ", "120"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Comments(JobArgs {
            target: Some(ref t),
            count: Some(120),
            ..
        })) if t == "dQw4w9WgXcQ"
    ));
}

#[test]
fn parses_channel_videos_with_batch_size() {
    let cli = Cli::try_parse_from([
        "ytrelay-cli",
        "channel-videos",
        "@mkbhd",
        "30",
        "--batch-size",
        "10",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::ChannelVideos(JobArgs {
            target: Some(ref t),
            count: Some(30),
            batch_size: Some(10),
            ..
        })) if t == "@mkbhd"
    ));
}

#[test]
fn zero_and_non_numeric_counts_are_rejected() {
    assert!(Cli::try_parse_from(["ytrelay-cli", "search", "q", "0"]).is_err());
    assert!(Cli::try_parse_from(["ytrelay-cli", "search", "q", "many"]).is_err());
}

#[test]
fn zero_batch_size_is_rejected() {
    assert!(Cli::try_parse_from(["ytrelay-cli", "search", "q", "--batch-size", "0"]).is_err());
    assert!(Cli::try_parse_from(["ytrelay-cli", "search", "q", "--batch-size", "x"]).is_err());
}

#[test]
fn search_publish_window_flags_reach_overrides() {
    let cli = Cli::try_parse_from([
        "ytrelay-cli",
        "search",
        "HONOR test",
        "--published-after",
        "2024-01-01",
        "--published-before",
        "2024-12-31",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    let overrides = args.overrides(Some(Mode::Search));
    assert_eq!(overrides.published_after, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(overrides.published_before, NaiveDate::from_ymd_opt(2024, 12, 31));
}

#[test]
fn malformed_publish_date_flag_is_rejected() {
    let result = Cli::try_parse_from([
        "ytrelay-cli",
        "search",
        "q",
        "--published-after",
        "01/02/2024",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_dispatch_command() {
    let cli = Cli::try_parse_from([
        "ytrelay-cli",
        "dispatch",
        "channel-videos",
        "@mkbhd",
        "--max-results",
        "40",
        "--webhook-url",
        "https://hooks.example.com/in",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Dispatch {
            mode: Mode::ChannelVideos,
            ref target,
            max_results: Some(40),
            webhook_url: Some(ref url),
            ..
        }) if target == "@mkbhd" && url == "https://hooks.example.com/in"
    ));
}

#[test]
fn dispatch_rejects_unknown_mode() {
    let result = Cli::try_parse_from(["ytrelay-cli", "dispatch", "playlists", "x"]);
    assert!(result.is_err());
}
