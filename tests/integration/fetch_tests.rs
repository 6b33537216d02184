//! Integration tests for fetching and decoding single pages
//!
//! These tests run the real reqwest transport against a wiremock server.

use chrono::{TimeZone, Utc};
use fa_scrape::models::{NoteFolder, SubmissionType};
use fa_scrape::{ClientConfig, FaClient, FaError, PageTheme};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server
fn create_test_client(server: &MockServer) -> FaClient {
    let config = ClientConfig::with_cookies("a=1; b=2")
        .site_root(server.uri())
        .disable_retry(true);
    FaClient::new(config).expect("Failed to create client")
}

const CLASSIC_SUBMISSION: &str = r#"<html><body data-static-path="/themes/classic">
<div id="page-submission">
  <div class="classic-submission-title information">
    <h2>Sunset</h2>
    <a href="/user/painter/">painter</a>
  </div>
  <img id="submissionImg" src="//t.furaffinity.net/42@400-1600000000.jpg"
       data-preview-src="//t.furaffinity.net/42@400-1600000000.jpg"
       data-fullview-src="//d.furaffinity.net/art/painter/sunset.png">
  <div id="keywords"><a href="/search/@keywords sky">sky</a><a href="/search/@keywords sun">sun</a></div>
</div>
</body></html>"#;

#[tokio::test]
async fn test_submission_over_http_sends_cookies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/view/42/"))
        .and(header("cookie", "a=1; b=2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CLASSIC_SUBMISSION))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let scraped = client.get_submission(42).await.expect("Fetch failed");

    assert_eq!(scraped.theme, PageTheme::Classic);
    let submission = scraped.data;
    assert_eq!(submission.id, 42);
    assert_eq!(submission.kind, Some(SubmissionType::Image));
    assert_eq!(submission.title.as_deref(), Some("Sunset"));
    assert_eq!(submission.artist_name.as_deref(), Some("painter"));
    assert_eq!(
        submission.content_url.as_deref(),
        Some("https://d.furaffinity.net/art/painter/sunset.png")
    );
    assert_eq!(submission.keywords, vec!["sky", "sun"]);
    assert!(submission.comments.is_empty());
}

const BETA_SUBMISSION: &str = r##"<html><body data-static-path="/themes/beta">
<div id="submission_page">
  <div class="submission-title"><p>Dusk</p></div>
  <img id="submissionImg" src="//t.furaffinity.net/43@400-1600000000.jpg"
       data-preview-src="//t.furaffinity.net/43@400-1600000000.jpg"
       data-fullview-src="//d.furaffinity.net/art/painter/dusk.png">
</div>
<div id="comments-submission">
  <div class="comment_container">
    <a class="comment_anchor" id="cid:900"></a>
    <div class="avatar-desktop"><a href="/user/fan/"><img class="comment_useravatar" src="//a.furaffinity.net/fan.gif"></a></div>
    <strong class="comment_username"><h3>fan</h3></strong>
    <div class="comment-date"><span class="popup_date">Oct 24, 2024 08:01 PM</span></div>
    <div class="comment_text">Beautiful colours</div>
    <a class="comment-link" href="#cid:900">link</a>
  </div>
  <div class="comment_container"><a class="comment_anchor" id="cid:901"></a><div class="comment_text"></div></div>
</div>
</body></html>"##;

#[tokio::test]
async fn test_beta_submission_comments_decode_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/view/43/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BETA_SUBMISSION))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::with_cookies("a=1")
        .site_root(mock_server.uri())
        .timezone("US/Pacific")
        .disable_retry(true);
    let client = FaClient::new(config).expect("Failed to create client");

    let scraped = client.get_submission(43).await.expect("Fetch failed");
    assert_eq!(scraped.theme, PageTheme::Beta);

    let submission = scraped.into_inner();
    assert_eq!(submission.title.as_deref(), Some("Dusk"));
    assert_eq!(submission.kind, Some(SubmissionType::Image));
    assert_eq!(submission.comments.len(), 2);

    let comment = &submission.comments[0];
    assert_eq!(comment.id, Some(900));
    assert_eq!(comment.user_name.as_deref(), Some("fan"));
    assert_eq!(comment.user_url.as_deref(), Some("/user/fan/"));
    assert_eq!(comment.body_text.as_deref(), Some("Beautiful colours"));
    assert_eq!(
        comment.when,
        Some(Utc.with_ymd_and_hms(2024, 10, 25, 3, 1, 0).unwrap())
    );
    assert!(!comment.is_hidden());

    // Moderated comments come through as near-empty records
    assert_eq!(submission.comments[1].id, Some(901));
    assert!(submission.comments[1].is_hidden());
}

#[tokio::test]
async fn test_move_notes_posts_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/msg/pms/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "manage_notes=1&move_to=trash&items%5B%5D=5&items%5B%5D=6",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    client
        .move_notes(&[5, 6], NoteFolder::Trash)
        .await
        .expect("Move failed");
}

#[tokio::test]
async fn test_soft_error_page_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/nobody/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>This user cannot be found.</p></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.get_user_page("nobody").await.unwrap_err();

    match err {
        FaError::Site { status, body, .. } => {
            assert_eq!(status, 404);
            assert!(body.contains("This user cannot be found."));
        }
        other => panic!("Expected a site error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_page_maps_to_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/msg/others/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body>You must be logged in to view this page.</body></html>",
        ))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.get_messages().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_server_error_is_not_retried_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journal/9/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.get_journal(9).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_not_found_status_is_permanent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/viewmessage/3/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Retries stay enabled; a 4xx must still fail on the first attempt
    let config = ClientConfig::with_cookies("a=1").site_root(mock_server.uri());
    let client = FaClient::new(config).expect("Failed to create client");

    let err = client.get_note(3).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
