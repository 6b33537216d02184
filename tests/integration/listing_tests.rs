//! Integration tests for paginated listings
//!
//! These tests walk multi-page listings served by a wiremock server.

use fa_scrape::models::{GalleryKind, SearchParams};
use fa_scrape::paginate::UserGallery;
use fa_scrape::{ClientConfig, Cursor, FaClient, Paginator};
use futures::TryStreamExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server: &MockServer) -> FaClient {
    let config = ClientConfig::with_cookies("a=1")
        .site_root(server.uri())
        .disable_retry(true);
    FaClient::new(config).expect("Failed to create client")
}

/// A classic gallery page with the given submissions and pagination links
fn classic_gallery(ids: &[u64], next: Option<&str>, previous: Option<&str>) -> String {
    let figures: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<figure id="sid-{id}"><b><u><a href="/view/{id}/"><img src="//t.furaffinity.net/{id}@200-1600000000.jpg"></a></u></b>
                   <figcaption><p><a href="/view/{id}/" title="Piece {id}">Piece {id}</a></p><p><a href="/user/artist/" title="artist">artist</a></p></figcaption></figure>"#
            )
        })
        .collect();
    let next = next
        .map(|href| format!(r#"<a class="button-link right" href="{}">Next</a>"#, href))
        .unwrap_or_default();
    let previous = previous
        .map(|href| format!(r#"<a class="button-link left" href="{}">Back</a>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><body data-static-path="/themes/classic"><section class="gallery">{}</section>{}{}</body></html>"#,
        figures, previous, next
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_gallery_walk_over_http() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/gallery/artist/",
        classic_gallery(&[30, 29], Some("/gallery/artist/2/"), None),
    )
    .await;
    mount_page(
        &mock_server,
        "/gallery/artist/2/",
        classic_gallery(&[28], None, Some("/gallery/artist/")),
    )
    .await;

    let client = create_test_client(&mock_server);
    let items = client
        .get_user_gallery("artist")
        .collect_all()
        .await
        .expect("Walk failed");

    let ids: Vec<Option<u64>> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![Some(30), Some(29), Some(28)]);
    assert_eq!(items[0].title.as_deref(), Some("Piece 30"));
    assert_eq!(items[0].artist_name.as_deref(), Some("artist"));
    assert_eq!(
        items[2].thumb_url.as_deref(),
        Some("https://t.furaffinity.net/28@200-1600000000.jpg")
    );
}

#[tokio::test]
async fn test_gallery_stream_yields_one_batch_per_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/scraps/artist/",
        classic_gallery(&[5], Some("/scraps/artist/2/"), None),
    )
    .await;
    mount_page(
        &mock_server,
        "/scraps/artist/2/",
        classic_gallery(&[4, 3], None, None),
    )
    .await;

    let client = create_test_client(&mock_server);
    let batches: Vec<Vec<_>> = client
        .get_user_scraps("artist")
        .into_stream()
        .try_collect()
        .await
        .expect("Stream failed");

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[1].len(), 2);
}

#[tokio::test]
async fn test_failed_page_can_be_resumed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/favorites/artist/",
        classic_gallery(&[9], Some("/favorites/artist/next/"), None),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/favorites/artist/next/"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut paginator = client.get_user_favorites("artist");

    let first = paginator.next_batch().await.expect("First page failed");
    assert_eq!(first.map(|batch| batch.len()), Some(1));

    let err = paginator.next_batch().await.unwrap_err();
    assert_eq!(err.status(), Some(502));

    let cursor = paginator.cursor().cloned().expect("Cursor lost after error");
    assert_eq!(cursor, Cursor::path("/favorites/artist/next/"));

    // The failing mock is spent; the page now loads
    mount_page(
        &mock_server,
        "/favorites/artist/next/",
        classic_gallery(&[8], None, None),
    )
    .await;

    let resumed = Paginator::resume(
        &client,
        UserGallery::new("artist", GalleryKind::Favorites),
        cursor,
    );
    let rest = resumed.collect_all().await.expect("Resume failed");
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].id, Some(8));
}

#[tokio::test]
async fn test_search_posts_successive_pages() {
    let mock_server = MockServer::start().await;

    let results = |id: u64, more: bool| {
        let button = if more {
            r#"<button type="submit" name="next_page">Next</button>"#
        } else {
            ""
        };
        format!(
            r#"<html><body data-static-path="/themes/beta"><div id="search-results"><div id="gallery-search-results">
               <figure class="t-image" id="sid-{id}"><a href="/view/{id}/"><img src="//t.furaffinity.net/{id}@200-1600000000.jpg"></a>
               <figcaption><a href="/view/{id}/">t</a> <a href="/user/someone/">someone</a></figcaption></figure>
               </div>{button}</div></body></html>"#
        )
    };

    Mock::given(method("POST"))
        .and(path("/search/"))
        .and(body_string_contains("&page=1&"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results(100, true)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search/"))
        .and(body_string_contains("&page=2&"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results(99, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let items = client
        .search("fox", SearchParams::default())
        .collect_all()
        .await
        .expect("Search failed");

    let ids: Vec<Option<u64>> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![Some(100), Some(99)]);
    assert_eq!(items[1].artist_name.as_deref(), Some("someone"));
}
