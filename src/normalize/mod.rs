//! Normalizers for raw scraped strings
//!
//! This module provides functionality for:
//! - Rewriting protocol-relative URLs into absolute https URLs
//! - Pulling numeric IDs out of paths and element ids
//! - Parsing the site's human-readable dates into UTC instants
//! - Rendering HTML bodies as plain text for diagnostics
//!
//! Every function here is total: malformed input gives `None`, never a panic.

mod date;
mod id;
mod text;
mod url;

pub use date::{read_date_when, thumbnail_date, unix_timestamp, DATE_FORMATS};
pub use id::{journal_id, leading_int, split_id, view_id};
pub use text::{plain_text, strip_tilde, unquote};
pub use url::fix_url;
