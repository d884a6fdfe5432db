use super::*;

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::new(Client::new(), "test-key", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_resource_and_key() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client
        .build_url("videos", &[("part", "snippet"), ("id", "a,b")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/videos?key=test-key&part=snippet&id=a%2Cb"
    );
}

#[test]
fn build_url_normalises_trailing_slashes() {
    let client = test_client("http://127.0.0.1:8080//");
    let url = client.build_url("search", &[]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/search?key=test-key");
}

#[test]
fn build_url_encodes_query_text() {
    let client = test_client(DEFAULT_BASE_URL);
    let url = client.build_url("search", &[("q", "HONOR 400 & more")]).unwrap();
    assert!(
        url.as_str().contains("q=HONOR+400+%26+more"),
        "query should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = YoutubeClient::new(Client::new(), "k", "not a url");
    assert!(matches!(result, Err(YoutubeError::InvalidBaseUrl { .. })));
}

#[test]
fn status_error_decodes_google_envelope() {
    let body = r#"{
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [{ "domain": "youtube.quota", "reason": "quotaExceeded", "message": "quota" }]
        }
    }"#;
    let err = YoutubeClient::status_error(StatusCode::FORBIDDEN, body, "search");
    match err {
        YoutubeError::Api {
            status,
            reason,
            message,
        } => {
            assert_eq!(status, 403);
            assert_eq!(reason, "quotaExceeded");
            assert!(message.contains("exceeded your quota"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[test]
fn status_error_without_envelope_is_unexpected_status() {
    let err = YoutubeClient::status_error(StatusCode::BAD_GATEWAY, "<html>", "videos");
    assert!(matches!(
        err,
        YoutubeError::UnexpectedStatus { status: 502, ref resource } if resource == "videos"
    ));
}
