//! Public client
//!
//! [`FaClient`] ties the pieces together. Each operation fetches a page
//! through the [`PageFetcher`], detects its theme, applies the matching field
//! map and decodes the record into a typed model. Listing operations return a
//! [`Paginator`] instead of fetching anything up front.

use crate::config::{self, ClientConfig};
use crate::extract::{extract, DualFieldMap, ExtractContext, PageTheme};
use crate::fetch::{FetchOptions, PageFetcher, SoftErrorTable};
use crate::maps;
use crate::models::{
    CommentOrigin, CommentText, GalleryKind, Journal, JournalListing, Messages, Navigation, Note,
    NoteFolder, Notes, SearchPage, SearchParams, Submission, SubmissionListing,
    SubmissionStatistics, UserPage, WatchDirection, WatchedUser,
};
use crate::paginate::{
    Cursor, Listing, ListingPage, Paginator, SearchListing, SubmissionInbox, UserGallery,
    UserJournals, UserWatchlist,
};
use crate::transport::{FormBody, ReqwestTransport, Transport};
use crate::{FaError, Result};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// An extracted record together with the theme of the page it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scraped<T> {
    pub theme: PageTheme,
    pub data: T,
}

impl<T> Scraped<T> {
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Transforms the record, keeping the theme
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scraped<U> {
        Scraped {
            theme: self.theme,
            data: f(self.data),
        }
    }
}

/// Scraping client for one account
#[derive(Debug, Clone)]
pub struct FaClient {
    fetcher: PageFetcher,
    timezone: Option<Tz>,
}

impl FaClient {
    /// Creates a client over the built-in reqwest transport
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    ///
    /// # Returns
    ///
    /// * `Ok(FaClient)` - A ready client
    /// * `Err(FaError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client over an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config::validate(&config)?;

        let timezone = match config.timezone.as_deref() {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|_| FaError::InvalidTimezone(name.to_string()))?,
            ),
            None => None,
        };

        let fetcher = PageFetcher::new(transport, Url::parse(&config.site_root)?)
            .with_cookies(config.cookies)
            .with_retry(config.disable_retry, config.max_retries);

        Ok(Self { fetcher, timezone })
    }

    /// Replaces the table of error pages served with a 200 status
    pub fn with_soft_errors(mut self, soft_errors: SoftErrorTable) -> Self {
        self.fetcher = self.fetcher.with_soft_errors(soft_errors);
        self
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// A fresh extraction context carrying the account's timezone
    pub fn context(&self) -> ExtractContext {
        ExtractContext::new(self.timezone)
    }

    /// Fetches a page and decodes it with `map`
    ///
    /// # Arguments
    ///
    /// * `path` - Page path or absolute URL
    /// * `options` - Method and form body
    /// * `map` - Field map for the page kind
    /// * `ctx` - Request-derived values read by the map
    ///
    /// # Returns
    ///
    /// * `Ok(Scraped<T>)` - The decoded record and the page theme
    /// * `Err(FaError::Decode)` - The record does not fit `T`
    /// * `Err(_)` - The fetch failed
    pub async fn scrape<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &FetchOptions,
        map: &DualFieldMap,
        ctx: &ExtractContext,
    ) -> Result<Scraped<T>> {
        let body = self.fetcher.fetch(path, options).await?;
        let extraction = extract(&body, map, ctx);

        let data = serde_json::from_value(Value::Object(extraction.record)).map_err(|source| {
            FaError::Decode {
                url: path.to_string(),
                source,
            }
        })?;

        Ok(Scraped {
            theme: extraction.theme,
            data,
        })
    }

    pub(crate) async fn scrape_listing<T: DeserializeOwned>(
        &self,
        path: &str,
        map: &DualFieldMap,
    ) -> Result<Scraped<ListingPage<T>>> {
        let ctx = self.context().with_param("self_link", path);
        self.scrape(path, &FetchOptions::get(), map, &ctx).await
    }

    async fn scrape_by_id<T: DeserializeOwned>(
        &self,
        path: &str,
        id: u64,
        map: &DualFieldMap,
    ) -> Result<Scraped<T>> {
        let ctx = self
            .context()
            .with_param("id", id)
            .with_param("self_link", path);
        self.scrape(path, &FetchOptions::get(), map, &ctx).await
    }

    // Submission inbox

    pub fn get_submissions(&self) -> Paginator<'_, SubmissionInbox> {
        Paginator::new(self, SubmissionInbox)
    }

    /// One inbox page; `None` starts at the newest submissions
    pub async fn get_submissions_page(
        &self,
        cursor: Option<&str>,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        let cursor = cursor.map(Cursor::path).unwrap_or_else(|| SubmissionInbox.start());
        SubmissionInbox.page(self, &cursor).await
    }

    // User folders

    pub fn get_user_gallery(&self, user: &str) -> Paginator<'_, UserGallery> {
        Paginator::new(self, UserGallery::new(user, GalleryKind::Gallery))
    }

    pub async fn get_user_gallery_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        self.folder_page(user, GalleryKind::Gallery, page).await
    }

    pub fn get_user_scraps(&self, user: &str) -> Paginator<'_, UserGallery> {
        Paginator::new(self, UserGallery::new(user, GalleryKind::Scraps))
    }

    pub async fn get_user_scraps_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        self.folder_page(user, GalleryKind::Scraps, page).await
    }

    pub fn get_user_favorites(&self, user: &str) -> Paginator<'_, UserGallery> {
        Paginator::new(self, UserGallery::new(user, GalleryKind::Favorites))
    }

    pub async fn get_user_favorites_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        self.folder_page(user, GalleryKind::Favorites, page).await
    }

    async fn folder_page(
        &self,
        user: &str,
        kind: GalleryKind,
        page: u32,
    ) -> Result<Scraped<ListingPage<SubmissionListing>>> {
        UserGallery::new(user, kind)
            .page(self, &Cursor::Page(page))
            .await
    }

    // Users

    pub async fn get_user_page(&self, user: &str) -> Result<Scraped<UserPage>> {
        let path = format!("/user/{}/", user);
        let ctx = self.context().with_param("self_link", path.as_str());
        self.scrape(&path, &FetchOptions::get(), maps::user_page(), &ctx)
            .await
    }

    pub fn get_user_journals(&self, user: &str) -> Paginator<'_, UserJournals> {
        Paginator::new(self, UserJournals::new(user))
    }

    pub async fn get_user_journals_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<JournalListing>>> {
        UserJournals::new(user).page(self, &Cursor::Page(page)).await
    }

    /// Users that `user` watches
    pub fn get_user_watching(&self, user: &str) -> Paginator<'_, UserWatchlist> {
        Paginator::new(self, UserWatchlist::new(user, WatchDirection::Watching))
    }

    /// Users watching `user`
    pub fn get_user_watchers(&self, user: &str) -> Paginator<'_, UserWatchlist> {
        Paginator::new(self, UserWatchlist::new(user, WatchDirection::Watchers))
    }

    pub async fn get_user_watching_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<WatchedUser>>> {
        UserWatchlist::new(user, WatchDirection::Watching)
            .page(self, &Cursor::Page(page))
            .await
    }

    pub async fn get_user_watchers_page(
        &self,
        user: &str,
        page: u32,
    ) -> Result<Scraped<ListingPage<WatchedUser>>> {
        UserWatchlist::new(user, WatchDirection::Watchers)
            .page(self, &Cursor::Page(page))
            .await
    }

    pub async fn get_submission_statistics(
        &self,
        user: &str,
    ) -> Result<Scraped<SubmissionStatistics>> {
        let path = format!("/stats/{}/submissions/", user);
        let ctx = self.context().with_param("user_name", user);
        self.scrape(&path, &FetchOptions::get(), maps::statistics(), &ctx)
            .await
    }

    // Single pages

    pub async fn get_submission(&self, id: u64) -> Result<Scraped<Submission>> {
        let path = format!("/view/{}/", id);
        self.scrape_by_id(&path, id, maps::submission()).await
    }

    pub async fn get_journal(&self, id: u64) -> Result<Scraped<Journal>> {
        let path = format!("/journal/{}/", id);
        self.scrape_by_id(&path, id, maps::journal()).await
    }

    pub async fn get_comment_text(
        &self,
        id: u64,
        origin: CommentOrigin,
    ) -> Result<Scraped<CommentText>> {
        let path = format!("/replyto/{}/{}", origin.as_str(), id);
        self.scrape_by_id(&path, id, maps::comment_text()).await
    }

    // Message center

    pub async fn get_messages(&self) -> Result<Scraped<Messages>> {
        self.scrape("/msg/others/", &FetchOptions::get(), maps::messages(), &self.context())
            .await
    }

    pub async fn get_notes(&self) -> Result<Scraped<Notes>> {
        self.scrape("/msg/pms/", &FetchOptions::get(), maps::notes(), &self.context())
            .await
    }

    pub async fn get_note(&self, id: u64) -> Result<Scraped<Note>> {
        let path = format!("/viewmessage/{}/", id);
        self.scrape_by_id(&path, id, maps::note()).await
    }

    /// Moves notes to another folder with a single form POST
    ///
    /// # Arguments
    ///
    /// * `ids` - Notes to move
    /// * `folder` - Destination folder
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The site accepted the request
    /// * `Err(FaError)` - The request failed or was classified as an error
    pub async fn move_notes(&self, ids: &[u64], folder: NoteFolder) -> Result<()> {
        let mut form = FormBody::new()
            .with("manage_notes", 1)
            .with("move_to", folder.as_str());
        for id in ids {
            form.push("items[]", id);
        }

        tracing::debug!("Moving {} notes to {}", ids.len(), folder.as_str());
        self.fetcher
            .fetch("/msg/pms/", &FetchOptions::post(form))
            .await?;
        Ok(())
    }

    // Search

    pub fn search(&self, query: &str, params: SearchParams) -> Paginator<'_, SearchListing> {
        Paginator::new(self, SearchListing::new(query, params))
    }

    pub async fn get_search_page(
        &self,
        query: &str,
        params: &SearchParams,
        page: u32,
    ) -> Result<Scraped<SearchPage>> {
        let form = params.form_body(query, page);
        self.scrape(
            "/search/",
            &FetchOptions::post(form),
            maps::search(),
            &self.context(),
        )
        .await
    }

    // Navigation

    /// Previous and next submissions from a submission's mini-gallery
    pub fn navigation_from_submission(submission: &Submission) -> Navigation {
        submission.navigation()
    }

    pub fn navigation_for(id: u64, items: &[u64]) -> Navigation {
        Navigation::between(id, items)
    }
}
