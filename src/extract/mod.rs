//! Theme detection and field-map extraction
//!
//! This module provides functionality for:
//! - Detecting whether a page uses the classic or beta theme
//! - Describing records as declarative [`FieldMap`] trees
//! - Resolving a [`DualFieldMap`] against a page into a JSON record

pub mod extractor;
pub mod fieldmap;
pub mod theme;

use chrono_tz::Tz;
use serde_json::{Map, Value};

pub use extractor::{extract, extract_document, Extraction};
pub use fieldmap::{Converter, Css, Custom, DualFieldMap, Extractable, Field, FieldMap, Rule};
pub use theme::{detect_theme, PageTheme};

/// Per-call inputs to an extraction
///
/// Field maps are static; anything derived from the request (the requested
/// path, the ID, the username) is passed in here and read through
/// [`Extractable::Param`].
#[derive(Debug, Clone, Default)]
pub struct ExtractContext {
    /// Zone the account renders times in
    pub timezone: Option<Tz>,
    params: Map<String, Value>,
}

impl ExtractContext {
    pub fn new(timezone: Option<Tz>) -> Self {
        Self {
            timezone,
            params: Map::new(),
        }
    }

    /// Adds a request-derived value
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Looks up a request-derived value; unknown names are `null`
    pub fn param(&self, name: &str) -> Value {
        self.params.get(name).cloned().unwrap_or(Value::Null)
    }
}
