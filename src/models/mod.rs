//! Typed output records
//!
//! Each page kind decodes into one of these shapes. Field names match the keys
//! the field maps emit, and every field read from the page is optional: a
//! missing element is never an error.

mod journal;
mod messages;
mod search;
mod submission;
mod user;

pub use journal::{Journal, JournalListing};
pub use messages::{
    FavoriteMessage, JournalCommentMessage, JournalMessage, Messages, Note, NoteFolder,
    NoteListing, Notes, ShoutMessage, SubmissionCommentMessage, WatchMessage,
};
pub use search::{
    OrderBy, OrderDirection, Ratings, SearchMode, SearchPage, SearchParams, SearchRange,
    SubmissionTypes,
};
pub use submission::{
    Comment, CommentOrigin, CommentText, GalleryKind, Navigation, Submission, SubmissionListing,
    SubmissionType,
};
pub use user::{
    ArtistInfo, ContactInfo, FeaturedSubmission, GalleryThumb, Shout, SubmissionStatistic,
    SubmissionStatistics, TopJournal, UserPage, WatchDirection, WatchedUser,
};
