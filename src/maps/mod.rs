//! Field maps for every supported page
//!
//! Each map is built once per process and shared. Request-specific values
//! reach a map through the [`ExtractContext`](crate::extract::ExtractContext)
//! rather than being baked into it.

pub mod custom;
pub mod gallery;
pub mod journal;
pub mod messages;
pub mod pick;
pub mod submission;
pub mod user;

use crate::extract::DualFieldMap;
use crate::models::GalleryKind;
use std::sync::OnceLock;

macro_rules! cached_map {
    ($(#[$meta:meta])* $name:ident => $build:expr) => {
        $(#[$meta])*
        pub fn $name() -> &'static DualFieldMap {
            static MAP: OnceLock<DualFieldMap> = OnceLock::new();
            MAP.get_or_init(|| $build)
        }
    };
}

cached_map!(
    /// `/msg/submissions/`
    inbox => gallery::inbox_map()
);
cached_map!(search => gallery::search_map());
cached_map!(
    /// `/view/{id}/`
    submission => submission::submission_map()
);
cached_map!(journal => journal::journal_map());
cached_map!(journals => journal::journals_map());
cached_map!(user_page => user::user_page_map());
cached_map!(watchlist => user::watchlist_map());
cached_map!(statistics => user::statistics_map());
cached_map!(
    /// `/msg/others/`
    messages => messages::messages_map()
);
cached_map!(notes => messages::notes_map());
cached_map!(note => messages::note_map());
cached_map!(comment_text => messages::comment_text_map());

/// Gallery, scraps or favorites listing
pub fn gallery(kind: GalleryKind) -> &'static DualFieldMap {
    static GALLERY: OnceLock<DualFieldMap> = OnceLock::new();
    static SCRAPS: OnceLock<DualFieldMap> = OnceLock::new();
    static FAVORITES: OnceLock<DualFieldMap> = OnceLock::new();

    let cell = match kind {
        GalleryKind::Gallery => &GALLERY,
        GalleryKind::Scraps => &SCRAPS,
        GalleryKind::Favorites => &FAVORITES,
    };
    cell.get_or_init(|| gallery::gallery_map(kind))
}

/// Every registered map, by name
pub fn all() -> Vec<(&'static str, &'static DualFieldMap)> {
    vec![
        ("inbox", inbox()),
        ("gallery", gallery(GalleryKind::Gallery)),
        ("scraps", gallery(GalleryKind::Scraps)),
        ("favorites", gallery(GalleryKind::Favorites)),
        ("search", search()),
        ("submission", submission()),
        ("journal", journal()),
        ("journals", journals()),
        ("user_page", user_page()),
        ("watchlist", watchlist()),
        ("statistics", statistics()),
        ("messages", messages()),
        ("notes", notes()),
        ("note", note()),
        ("comment_text", comment_text()),
    ]
}
