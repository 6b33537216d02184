use crate::models::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journal's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: u64,
    pub self_link: String,
    pub title: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub user_thumb_url: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A journal entry on a user's journal listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalListing {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
    pub comment_count: Option<i64>,
}
