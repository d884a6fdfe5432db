//! Integration tests for `YoutubeClient` against a wiremock server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chrono::NaiveDate;
use ytrelay_youtube::{parse_channel_ref, SearchFilter, YoutubeClient, YoutubeError};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::new(reqwest::Client::new(), "test-key", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_page_sends_listing_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "test-key"))
        .and(query_param("part", "snippet"))
        .and(query_param("type", "video"))
        .and(query_param("order", "viewCount"))
        .and(query_param("q", "HONOR 400"))
        .and(query_param("maxResults", "50"))
        .and(query_param_is_missing("pageToken"))
        .and(query_param_is_missing("publishedAfter"))
        .and(query_param_is_missing("publishedBefore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CDIQAA",
            "pageInfo": { "totalResults": 1000000, "resultsPerPage": 50 },
            "items": [
                { "kind": "youtube#searchResult", "id": { "kind": "youtube#video", "videoId": "abc" },
                  "snippet": { "title": "HONOR 400 review", "channelId": "UC1" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page("HONOR 400", &SearchFilter::default(), 50, None)
        .await
        .expect("search page should parse");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id.video_id.as_deref(), Some("abc"));
    assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
    assert_eq!(page.page_info.and_then(|p| p.results_per_page), Some(50));
}

#[tokio::test]
async fn search_page_forwards_publish_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "HONOR test"))
        .and(query_param("publishedAfter", "2024-01-01T00:00:00Z"))
        .and(query_param("publishedBefore", "2025-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = SearchFilter::from_dates(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 12, 31),
    );
    let client = test_client(&server.uri());
    let page = client
        .search_page("HONOR test", &filter, 3, None)
        .await
        .expect("filtered search page should parse");

    assert!(page.items.is_empty());
}

#[tokio::test]
async fn page_token_and_clamped_page_size_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "vid"))
        .and(query_param("pageToken", "next"))
        .and(query_param("maxResults", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .comment_threads_page("vid", 500, Some("next"))
        .await
        .expect("comment page should parse");

    assert!(page.items.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn videos_returns_detail_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "a,b"))
        .and(query_param(
            "part",
            "snippet,statistics,contentDetails,status,recordingDetails,topicDetails",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "a", "statistics": { "viewCount": "10" } },
                { "id": "b", "statistics": { "viewCount": "20" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .videos(&["a".to_string(), "b".to_string()])
        .await
        .expect("videos should parse");

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[1].id, "b");
}

#[tokio::test]
async fn videos_with_no_ids_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.videos(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "domain": "youtube.quota", "reason": "quotaExceeded" }]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search_page("q", &SearchFilter::default(), 5, None)
        .await;

    match result {
        Err(YoutubeError::Api { status, reason, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(reason, "quotaExceeded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_becomes_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.videos(&["a".to_string()]).await;

    assert!(
        matches!(result, Err(YoutubeError::UnexpectedStatus { status: 503, ref resource }) if resource == "videos"),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_becomes_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.channels(&["UC1".to_string()]).await;

    assert!(
        matches!(result, Err(YoutubeError::Deserialize { ref context, .. }) if context.contains("channels")),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn resolve_channel_by_handle_uses_for_handle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("forHandle", "@JerryRigEverything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCWFKCr40YwOZQx8FHU_ZqqQ",
                "snippet": { "title": "JerryRigEverything" },
                "contentDetails": { "relatedPlaylists": { "uploads": "UUWFKCr40YwOZQx8FHU_ZqqQ" } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reference = parse_channel_ref("@JerryRigEverything").unwrap();
    let channel = client.resolve_channel(&reference).await.unwrap();

    assert_eq!(channel.id, "UCWFKCr40YwOZQx8FHU_ZqqQ");
    assert_eq!(channel.uploads_playlist_id(), Some("UUWFKCr40YwOZQx8FHU_ZqqQ"));
}

#[tokio::test]
async fn resolve_channel_with_no_items_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reference = parse_channel_ref("@nobody_here").unwrap();
    let result = client.resolve_channel(&reference).await;

    assert!(
        matches!(result, Err(YoutubeError::NotFound { resource: "channel", ref id }) if id == "@nobody_here"),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_api_key() {
    // Nothing listens on port 1.
    let client = YoutubeClient::new(reqwest::Client::new(), "super-secret", "http://127.0.0.1:1")
        .expect("client construction should not fail");
    let err = client
        .search_page("q", &SearchFilter::default(), 5, None)
        .await
        .expect_err("request to a closed port should fail");

    assert!(matches!(err, YoutubeError::Http(_)));
    assert!(!err.to_string().contains("super-secret"));
    assert!(!format!("{err:?}").contains("super-secret"));
}
