//! fa-scrape: a screen-scraping client for FurAffinity
//!
//! FurAffinity has no stable API, so this crate fetches HTML pages and maps them
//! onto typed records. Every page kind has two rule sets, one per site theme
//! ("classic" and "beta"); the theme is detected per page and the matching rules
//! are applied. Listing pages are exposed as lazy, restartable paginators.

pub mod client;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod maps;
pub mod models;
pub mod normalize;
pub mod paginate;
pub mod transport;

use thiserror::Error;

/// Main error type for fa-scrape operations
#[derive(Debug, Error)]
pub enum FaError {
    /// The site answered with an error, either as an HTTP status or as an
    /// error page served with a 200.
    #[error("Site error {status} for {url}")]
    Site {
        status: u16,
        url: String,
        /// Plain-text rendering of the response body, for diagnostics
        body: String,
    },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode record from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

impl FaError {
    /// Returns the site status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Site { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for fa-scrape operations
pub type Result<T> = std::result::Result<T, FaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{FaClient, Scraped};
pub use config::ClientConfig;
pub use extract::PageTheme;
pub use paginate::{Cursor, ListingPage, Paginator};
pub use transport::{ReqwestTransport, Transport};
