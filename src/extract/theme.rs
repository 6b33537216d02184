use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker value of `body[data-static-path]` on beta pages
pub const BETA_STATIC_PATH: &str = "/themes/beta";

/// Site layout a page was rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTheme {
    Classic,
    Beta,
}

impl fmt::Display for PageTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTheme::Classic => write!(f, "classic"),
            PageTheme::Beta => write!(f, "beta"),
        }
    }
}

/// Determines the theme of a parsed page
///
/// Reads `data-static-path` from `<body>`, falling back to the root element.
/// Anything other than the beta marker, including no marker at all, is classic.
pub fn detect_theme(document: &Html) -> PageTheme {
    let from_body = Selector::parse("body").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .and_then(|body| body.value().attr("data-static-path"))
    });

    let marker = from_body.or_else(|| document.root_element().value().attr("data-static-path"));

    match marker {
        Some(path) if path.trim() == BETA_STATIC_PATH => PageTheme::Beta,
        _ => PageTheme::Classic,
    }
}
