//! Page fetching and error classification
//!
//! This module handles every request the client makes, including:
//! - Resolving page paths against the site root
//! - Classifying soft errors served with a 200 status
//! - Exponential backoff on transient (5xx) failures

pub mod classify;
pub mod fetcher;

pub use classify::{classify, SoftError, SoftErrorTable};
pub use fetcher::{backoff_delay, FetchOptions, PageFetcher};
