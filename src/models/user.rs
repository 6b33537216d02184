use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    /// Display form of the username
    pub user_name: Option<String>,
    pub user_class: Option<String>,
    pub self_link: String,
    pub user_thumb_url: Option<String>,
    pub header_text: Option<String>,
    pub header_html: Option<String>,
    pub statistics_text: Option<String>,
    pub statistics_html: Option<String>,
    pub featured_submission: Option<FeaturedSubmission>,
    #[serde(default)]
    pub latest_submissions: Vec<GalleryThumb>,
    #[serde(default)]
    pub favorites: Vec<GalleryThumb>,
    pub top_journal: Option<TopJournal>,
    pub profile_id: Option<GalleryThumb>,
    #[serde(default)]
    pub artist_information: Vec<ArtistInfo>,
    #[serde(default)]
    pub contact_information: Vec<ContactInfo>,
    #[serde(default)]
    pub shouts: Vec<Shout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedSubmission {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub title: Option<String>,
    pub thumb_url: Option<String>,
}

/// A submission thumbnail on a profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryThumb {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub thumb_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopJournal {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
    pub comment_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub title: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub service: Option<String>,
    pub link: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shout {
    pub id: Option<u64>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub user_thumb_url: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

/// A user on a watch list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedUser {
    pub user_name: Option<String>,
    pub user_url: Option<String>,
}

/// Which side of a watch relationship to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchDirection {
    /// Users the given user watches
    Watching,
    /// Users watching the given user
    Watchers,
}

impl WatchDirection {
    pub fn path(&self, user: &str) -> String {
        match self {
            WatchDirection::Watching => format!("/watchlist/by/{}/", user),
            WatchDirection::Watchers => format!("/watchlist/to/{}/", user),
        }
    }
}

/// Per-submission counters from a user's statistics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStatistic {
    pub id: Option<u64>,
    pub submission_title: Option<String>,
    pub submission_url: Option<String>,
    pub thumb_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
    pub views: Option<i64>,
    pub favorites: Option<i64>,
    pub comments: Option<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStatistics {
    pub user_name: String,
    #[serde(default)]
    pub statistics: Vec<SubmissionStatistic>,
}
