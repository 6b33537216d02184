//! The site's paginated listings

use crate::client::{FaClient, Scraped};
use crate::fetch::FetchOptions;
use crate::maps;
use crate::models::{
    GalleryKind, JournalListing, SearchPage, SearchParams, SubmissionListing, WatchDirection,
    WatchedUser,
};
use crate::paginate::{Cursor, Listing, ListingPage};
use crate::Result;
use async_trait::async_trait;

pub(crate) const INBOX_PATH: &str = "/msg/submissions/";
pub(crate) const SEARCH_PATH: &str = "/search/";

/// New submissions from watched users
#[derive(Debug, Clone, Default)]
pub struct SubmissionInbox;

#[async_trait]
impl Listing for SubmissionInbox {
    type Item = SubmissionListing;

    fn start(&self) -> Cursor {
        Cursor::path(INBOX_PATH)
    }

    async fn page(
        &self,
        client: &FaClient,
        cursor: &Cursor,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        // The inbox is keyed by submission ID, so page numbers restart it
        let path = match cursor {
            Cursor::Path(path) => path.as_str(),
            Cursor::Page(_) => INBOX_PATH,
        };
        client.scrape_listing(path, maps::inbox()).await
    }
}

/// A user's gallery, scraps or favorites
#[derive(Debug, Clone)]
pub struct UserGallery {
    pub user: String,
    pub kind: GalleryKind,
}

impl UserGallery {
    pub fn new(user: impl Into<String>, kind: GalleryKind) -> Self {
        Self {
            user: user.into(),
            kind,
        }
    }
}

#[async_trait]
impl Listing for UserGallery {
    type Item = SubmissionListing;

    fn start(&self) -> Cursor {
        Cursor::path(self.kind.path(&self.user))
    }

    async fn page(
        &self,
        client: &FaClient,
        cursor: &Cursor,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        let path = match cursor {
            Cursor::Path(path) => path.clone(),
            Cursor::Page(n) => self.kind.page_path(&self.user, *n),
        };
        client.scrape_listing(&path, maps::gallery(self.kind)).await
    }
}

/// A user's journals
#[derive(Debug, Clone)]
pub struct UserJournals {
    pub user: String,
}

impl UserJournals {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    pub fn page_path(&self, page: u32) -> String {
        format!("/journals/{}/{}/", self.user, page)
    }
}

#[async_trait]
impl Listing for UserJournals {
    type Item = JournalListing;

    fn start(&self) -> Cursor {
        Cursor::path(format!("/journals/{}/", self.user))
    }

    async fn page(
        &self,
        client: &FaClient,
        cursor: &Cursor,
    ) -> Result<Scraped<ListingPage<JournalListing>>> {
        let path = match cursor {
            Cursor::Path(path) => path.clone(),
            Cursor::Page(n) => self.page_path(*n),
        };
        client.scrape_listing(&path, maps::journals()).await
    }
}

/// Users a user watches, or users watching them
#[derive(Debug, Clone)]
pub struct UserWatchlist {
    pub user: String,
    pub direction: WatchDirection,
}

impl UserWatchlist {
    pub fn new(user: impl Into<String>, direction: WatchDirection) -> Self {
        Self {
            user: user.into(),
            direction,
        }
    }
}

#[async_trait]
impl Listing for UserWatchlist {
    type Item = WatchedUser;

    fn start(&self) -> Cursor {
        Cursor::path(self.direction.path(&self.user))
    }

    async fn page(
        &self,
        client: &FaClient,
        cursor: &Cursor,
    ) -> Result<Scraped<ListingPage<WatchedUser>>> {
        let path = match cursor {
            Cursor::Path(path) => path.clone(),
            Cursor::Page(n) => format!("{}{}/", self.direction.path(&self.user), n),
        };
        client.scrape_listing(&path, maps::watchlist()).await
    }
}

/// Search results, addressed by page number
#[derive(Debug, Clone)]
pub struct SearchListing {
    pub query: String,
    pub params: SearchParams,
}

impl SearchListing {
    pub fn new(query: impl Into<String>, params: SearchParams) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }
}

/// Converts a results page into a listing page; `more` means page `n + 1`
pub(crate) fn search_listing_page(page: SearchPage, number: u32) -> ListingPage<SubmissionListing> {
    ListingPage {
        items: page.items,
        self_link: Some(SEARCH_PATH.to_string()),
        next: page.more.then(|| Cursor::Page(number + 1)),
        previous: (number > 1).then(|| Cursor::Page(number - 1)),
    }
}

#[async_trait]
impl Listing for SearchListing {
    type Item = SubmissionListing;

    fn start(&self) -> Cursor {
        Cursor::Page(1)
    }

    async fn page(
        &self,
        client: &FaClient,
        cursor: &Cursor,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        let number = cursor.page_number().unwrap_or(1);
        let form = self.params.form_body(&self.query, number);
        let scraped: Scraped<SearchPage> = client
            .scrape(
                SEARCH_PATH,
                &FetchOptions::post(form),
                maps::search(),
                &client.context(),
            )
            .await?;
        Ok(scraped.map(|page| search_listing_page(page, number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::paginate::Paginator;
    use crate::transport::scripted::ScriptedTransport;
    use std::sync::Arc;

    fn results(ids: &[u64], more: bool) -> String {
        let figures: String = ids
            .iter()
            .map(|id| {
                format!(
                    r#"<figure class="t-image" id="sid-{id}"><a href="/view/{id}/"><img src="//t.furaffinity.net/{id}@200-1600000000.jpg"></a>
                       <figcaption><a href="/view/{id}/">t</a></figcaption></figure>"#
                )
            })
            .collect();
        let button = if more {
            r#"<button type="submit" name="next_page">Next</button>"#
        } else {
            ""
        };
        format!(
            r#"<html><body data-static-path="/themes/beta"><div id="search-results"><div id="gallery-search-results">{}</div>{}</div></body></html>"#,
            figures, button
        )
    }

    #[tokio::test]
    async fn test_search_pages_by_number() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond("https://www.furaffinity.net/search/", 200, &results(&[10, 9], true))
                .respond("https://www.furaffinity.net/search/", 200, &results(&[8], false)),
        );
        let client =
            FaClient::with_transport(ClientConfig::default(), transport.clone()).unwrap();

        let listing = SearchListing::new("fox", SearchParams::default());
        let mut paginator = Paginator::new(&client, listing);

        let first = paginator.next_batch().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(paginator.cursor(), Some(&Cursor::Page(2)));

        let second = paginator.next_batch().await.unwrap().unwrap();
        assert_eq!(second[0].id, Some(8));
        assert!(paginator.is_exhausted());

        let pages: Vec<Vec<String>> = transport
            .requests()
            .iter()
            .map(|(_, request)| {
                request
                    .body
                    .as_ref()
                    .map(|body| body.values("page").iter().map(|v| v.to_string()).collect())
                    .unwrap_or_default()
            })
            .collect();
        assert_eq!(pages, vec![vec!["1".to_string()], vec!["2".to_string()]]);
    }

    #[test]
    fn test_search_listing_page() {
        let page = search_listing_page(
            SearchPage {
                items: Vec::new(),
                more: true,
            },
            3,
        );
        assert_eq!(page.next, Some(Cursor::Page(4)));
        assert_eq!(page.previous, Some(Cursor::Page(2)));
    }

    #[test]
    fn test_page_numbers_map_to_paths() {
        assert_eq!(UserJournals::new("someone").page_path(2), "/journals/someone/2/");
        assert_eq!(
            UserGallery::new("someone", GalleryKind::Favorites).start(),
            Cursor::path("/favorites/someone/")
        );
        assert_eq!(
            UserWatchlist::new("someone", WatchDirection::Watchers).start(),
            Cursor::path("/watchlist/to/someone/")
        );
    }
}
