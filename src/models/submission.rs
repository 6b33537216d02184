use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content a submission holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Image,
    Flash,
    Story,
    Music,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Image => "image",
            SubmissionType::Flash => "flash",
            SubmissionType::Story => "story",
            SubmissionType::Music => "music",
        }
    }
}

/// Which of a user's submission folders to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    Gallery,
    Scraps,
    Favorites,
}

impl GalleryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryKind::Gallery => "gallery",
            GalleryKind::Scraps => "scraps",
            GalleryKind::Favorites => "favorites",
        }
    }

    /// First page of the folder
    pub fn path(&self, user: &str) -> String {
        format!("/{}/{}/", self.as_str(), user)
    }

    /// A numbered page of the folder
    pub fn page_path(&self, user: &str, page: u32) -> String {
        format!("/{}/{}/{}/", self.as_str(), user, page)
    }
}

/// A tile in a gallery, inbox or search listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionListing {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub thumb_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

/// A comment on a submission or journal
///
/// Moderated comments render as near-empty markup and come through with
/// empty or missing fields; see [`Comment::is_hidden`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub user_thumb_url: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    /// From the `data-timestamp` attribute, when present
    pub timestamp: Option<DateTime<Utc>>,
    pub when: Option<DateTime<Utc>>,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}

impl Comment {
    /// True for a moderated comment: no author, no text and no date
    pub fn is_hidden(&self) -> bool {
        blank(&self.user_name)
            && blank(&self.body_text)
            && self.when.is_none()
            && self.timestamp.is_none()
    }
}

/// Raw text of a single comment, from its reply page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentText {
    pub id: u64,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// What a comment is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrigin {
    Submission,
    Journal,
}

impl CommentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrigin::Submission => "submission",
            CommentOrigin::Journal => "journal",
        }
    }
}

/// A submission's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub self_link: String,
    #[serde(rename = "type")]
    pub kind: Option<SubmissionType>,
    pub title: Option<String>,
    pub thumb_url: Option<String>,
    pub content_url: Option<String>,
    pub artist_name: Option<String>,
    pub artist_url: Option<String>,
    pub artist_thumb_url: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// IDs of neighbouring submissions shown in the mini-gallery
    #[serde(default)]
    pub nav_items: Vec<u64>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Previous and next submissions relative to one submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl Navigation {
    /// Finds the closest IDs below and above `id` in `items`
    pub fn between(id: u64, items: &[u64]) -> Self {
        let previous = items.iter().copied().filter(|&item| item < id).max();
        let next = items.iter().copied().filter(|&item| item > id).min();
        Self { previous, next }
    }
}

impl Submission {
    /// Navigation derived from the submission's own mini-gallery
    pub fn navigation(&self) -> Navigation {
        Navigation::between(self.id, &self.nav_items)
    }
}
