use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The "other messages" page: watches, comments, shouts, favorites and journals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    pub my_username: Option<String>,
    #[serde(default)]
    pub watches: Vec<WatchMessage>,
    #[serde(default)]
    pub comments: Vec<SubmissionCommentMessage>,
    #[serde(default)]
    pub journal_comments: Vec<JournalCommentMessage>,
    #[serde(default)]
    pub shouts: Vec<ShoutMessage>,
    #[serde(default)]
    pub favorites: Vec<FavoriteMessage>,
    #[serde(default)]
    pub journals: Vec<JournalMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchMessage {
    pub id: Option<u64>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub user_thumb_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionCommentMessage {
    pub id: Option<u64>,
    pub submission_id: Option<u64>,
    pub submission_title: Option<String>,
    pub submission_url: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalCommentMessage {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub journal_id: Option<u64>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoutMessage {
    pub id: Option<u64>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMessage {
    pub id: Option<u64>,
    pub submission_id: Option<u64>,
    pub submission_title: Option<String>,
    pub submission_url: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalMessage {
    pub id: Option<u64>,
    pub journal_title: Option<String>,
    pub journal_url: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

/// The private message inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notes {
    #[serde(default)]
    pub notes: Vec<NoteListing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteListing {
    pub id: Option<u64>,
    pub self_link: Option<String>,
    pub title: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    #[serde(default)]
    pub unread: bool,
    pub when: Option<DateTime<Utc>>,
}

/// A single private message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub self_link: String,
    pub title: Option<String>,
    pub user_name: Option<String>,
    pub user_url: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub when: Option<DateTime<Utc>>,
}

/// Target folder of a note move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFolder {
    Unread,
    Restore,
    Archive,
    Trash,
}

impl NoteFolder {
    /// Value of the `move_to` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteFolder::Unread => "unread",
            NoteFolder::Restore => "restore",
            NoteFolder::Archive => "archive",
            NoteFolder::Trash => "trash",
        }
    }
}

impl std::str::FromStr for NoteFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unread" => Ok(NoteFolder::Unread),
            "restore" => Ok(NoteFolder::Restore),
            "archive" => Ok(NoteFolder::Archive),
            "trash" => Ok(NoteFolder::Trash),
            other => Err(format!("Unknown note folder '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_folder_parse() {
        assert_eq!("archive".parse::<NoteFolder>(), Ok(NoteFolder::Archive));
        assert_eq!("Trash".parse::<NoteFolder>(), Ok(NoteFolder::Trash));
        assert!("inbox".parse::<NoteFolder>().is_err());
        assert_eq!(NoteFolder::Restore.as_str(), "restore");
    }
}
