//! Lazy, restartable pagination over listing pages
//!
//! A [`Listing`] knows how to fetch one page at a [`Cursor`]. A [`Paginator`]
//! drives a listing page by page:
//! - Each call to [`Paginator::next_batch`] fetches exactly one page
//! - A `next` link that was already visited ends the walk
//! - A failed fetch leaves the cursor in place so the walk can be retried
//!   or saved and resumed later

mod listings;

pub use listings::{SearchListing, SubmissionInbox, UserGallery, UserJournals, UserWatchlist};

use crate::client::{FaClient, Scraped};
use crate::extract::PageTheme;
use crate::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Position of a page within a listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    /// A page path, absolute URL or form action
    Path(String),
    /// A page number, for listings addressed by number
    Page(u32),
}

impl Cursor {
    pub fn path(path: impl Into<String>) -> Self {
        Cursor::Path(path.into())
    }

    pub fn page_number(&self) -> Option<u32> {
        match self {
            Cursor::Page(n) => Some(*n),
            Cursor::Path(_) => None,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Path(path) => write!(f, "{}", path),
            Cursor::Page(n) => write!(f, "page {}", n),
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub self_link: Option<String>,
    #[serde(default)]
    pub next: Option<Cursor>,
    #[serde(default)]
    pub previous: Option<Cursor>,
}

/// A paginated listing
#[async_trait]
pub trait Listing: Send + Sync {
    type Item: DeserializeOwned + Send;

    /// Cursor of the first page
    fn start(&self) -> Cursor;

    /// Fetches and extracts the page at `cursor`
    async fn page(&self, client: &FaClient, cursor: &Cursor)
        -> Result<Scraped<ListingPage<Self::Item>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PaginatorState {
    Pending(Cursor),
    Exhausted,
}

/// Walks a [`Listing`] one page at a time
pub struct Paginator<'c, L: Listing> {
    client: &'c FaClient,
    listing: L,
    state: PaginatorState,
    visited: HashSet<String>,
    last_theme: Option<PageTheme>,
}

impl<'c, L: Listing> Paginator<'c, L> {
    /// Starts at the listing's first page
    pub fn new(client: &'c FaClient, listing: L) -> Self {
        let start = listing.start();
        Self::resume(client, listing, start)
    }

    /// Starts at a saved cursor
    pub fn resume(client: &'c FaClient, listing: L, cursor: Cursor) -> Self {
        Self {
            client,
            listing,
            state: PaginatorState::Pending(cursor),
            visited: HashSet::new(),
            last_theme: None,
        }
    }

    /// Cursor of the next page to fetch, or `None` once exhausted
    pub fn cursor(&self) -> Option<&Cursor> {
        match &self.state {
            PaginatorState::Pending(cursor) => Some(cursor),
            PaginatorState::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PaginatorState::Exhausted
    }

    /// Theme of the most recently fetched page
    pub fn last_theme(&self) -> Option<PageTheme> {
        self.last_theme
    }

    pub fn listing(&self) -> &L {
        &self.listing
    }

    /// Identity of a cursor for cycle detection; paths compare as absolute URLs
    fn visit_key(&self, cursor: &Cursor) -> String {
        match cursor {
            Cursor::Path(path) => self
                .client
                .fetcher()
                .resolve(path)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| path.clone()),
            Cursor::Page(n) => format!("page:{}", n),
        }
    }

    /// Fetches the next page
    ///
    /// # Returns
    ///
    /// * `Ok(Some(items))` - The items of one page
    /// * `Ok(None)` - The listing is exhausted
    /// * `Err(FaError)` - The fetch failed; the cursor is unchanged
    pub async fn next_batch(&mut self) -> Result<Option<Vec<L::Item>>> {
        let cursor = match &self.state {
            PaginatorState::Pending(cursor) => cursor.clone(),
            PaginatorState::Exhausted => return Ok(None),
        };

        let scraped = self.listing.page(self.client, &cursor).await?;
        self.last_theme = Some(scraped.theme);
        self.visited.insert(self.visit_key(&cursor));

        let page = scraped.data;
        if let Some(self_link) = &page.self_link {
            self.visited.insert(self.visit_key(&Cursor::path(self_link.as_str())));
        }

        match page.next {
            Some(next) if !self.visited.contains(&self.visit_key(&next)) => {
                tracing::debug!("Advancing from {} to {}", cursor, next);
                self.state = PaginatorState::Pending(next);
                Ok(Some(page.items))
            }
            next => {
                if let Some(next) = next {
                    tracing::warn!("Pagination cycle at {}: {} was already visited", cursor, next);
                }
                self.state = PaginatorState::Exhausted;
                if page.items.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(page.items))
                }
            }
        }
    }

    /// Turns the paginator into a stream of batches
    ///
    /// The stream ends after the last page or after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<L::Item>>> + 'c
    where
        L: 'c,
    {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let batch = paginator.next_batch().await?;
            Ok::<_, crate::FaError>(batch.map(|batch| (batch, paginator)))
        })
    }

    /// Collects every remaining item
    pub async fn collect_all(mut self) -> Result<Vec<L::Item>> {
        let mut all = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            all.extend(batch);
        }
        Ok(all)
    }
}

impl<'c, L: Listing> fmt::Debug for Paginator<'c, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("state", &self.state)
            .field("visited", &self.visited.len())
            .field("last_theme", &self.last_theme)
            .finish()
    }
}
