//! Declarative extraction trees
//!
//! A [`FieldMap`] describes how one output record is pulled out of a page: an
//! ordered list of named [`Rule`]s, each a selector plus an extraction mode and
//! an optional [`Converter`]. Maps are plain data, so they can be printed,
//! serialized and walked in tests.

use crate::extract::theme::PageTheme;
use crate::extract::ExtractContext;
use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A CSS selector parsed once at map construction
#[derive(Clone)]
pub struct Css {
    source: String,
    parsed: Option<Selector>,
}

impl Css {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let parsed = match Selector::parse(&source) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!("Invalid selector '{}': {:?}", source, e);
                None
            }
        };
        Self { source, parsed }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed selector, or `None` if it failed to parse
    pub fn selector(&self) -> Option<&Selector> {
        self.parsed.as_ref()
    }
}

impl fmt::Debug for Css {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Css({:?})", self.source)
    }
}

impl Serialize for Css {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Signature of multi-step extraction logic
pub type CustomFn = for<'a> fn(ElementRef<'a>, &ExtractContext) -> Value;

/// A named function used by [`Extractable::Custom`]
#[derive(Clone, Copy)]
pub struct Custom {
    pub name: &'static str,
    pub func: CustomFn,
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom({})", self.name)
    }
}

impl Serialize for Custom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// What to read from a matched element
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "arg", rename_all = "snake_case")]
pub enum Extractable {
    /// An attribute value, trimmed
    Attr(String),
    /// Inner text, trimmed
    Text,
    /// Inner HTML, trimmed
    Html,
    /// A date read from the text, then from the `title` attribute
    When,
    /// `true` if the selector matches anything
    Exists,
    /// A constant, ignoring the document
    Fixed(Value),
    /// A request-derived value taken from the [`ExtractContext`]
    Param(&'static str),
    /// Multi-step logic over the matched element
    Custom(Custom),
}

/// Named conversions applied to a raw string value
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Converter {
    FixUrl,
    Int,
    ViewId,
    JournalId,
    SplitId { separator: char },
    ThumbnailDate,
    UnixTimestamp,
    Regex {
        #[serde(serialize_with = "serialize_regex")]
        pattern: Regex,
        group: usize,
        numeric: bool,
    },
    StripTilde,
    Unquote,
    ClassContains { class: &'static str },
    Trim,
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

/// One node of an extraction tree
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// A single value; no selector means the context element itself
    Scalar {
        selector: Option<Css>,
        extract: Extractable,
        convert: Option<Converter>,
    },
    /// One record per match. With `fold`, single-field records collapse to their
    /// value and nulls are dropped.
    List {
        selector: Css,
        item: FieldMap,
        fold: bool,
    },
    /// A nested record scoped to the first match; `null` when the scope is absent
    Record { scope: Option<Css>, map: FieldMap },
}

impl Rule {
    /// Attaches a converter to a scalar rule; other rules are returned as-is
    pub fn convert(self, converter: Converter) -> Self {
        match self {
            Rule::Scalar {
                selector, extract, ..
            } => Rule::Scalar {
                selector,
                extract,
                convert: Some(converter),
            },
            other => other,
        }
    }

    /// Iterates every selector in this rule and its children
    fn collect_selectors<'a>(&'a self, out: &mut Vec<&'a Css>) {
        match self {
            Rule::Scalar { selector, .. } => out.extend(selector.iter()),
            Rule::List { selector, item, .. } => {
                out.push(selector);
                item.collect_selectors(out);
            }
            Rule::Record { scope, map } => {
                out.extend(scope.iter());
                map.collect_selectors(out);
            }
        }
    }
}

/// A named field of a [`FieldMap`]
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub rule: Rule,
}

/// An ordered set of field rules producing one record
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: Vec<Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field
    pub fn field(mut self, name: &'static str, rule: Rule) -> Self {
        self.fields.push(Field { name, rule });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    fn collect_selectors<'a>(&'a self, out: &mut Vec<&'a Css>) {
        for field in &self.fields {
            field.rule.collect_selectors(out);
        }
    }

    /// All selectors referenced anywhere in the tree
    pub fn selectors(&self) -> Vec<&Css> {
        let mut out = Vec::new();
        self.collect_selectors(&mut out);
        out
    }
}

/// The two rule sets for one output schema
#[derive(Debug, Clone, Serialize)]
pub struct DualFieldMap {
    pub classic: FieldMap,
    pub beta: FieldMap,
}

impl DualFieldMap {
    pub fn new(classic: FieldMap, beta: FieldMap) -> Self {
        Self { classic, beta }
    }

    /// Picks the rule set matching a detected theme
    pub fn for_theme(&self, theme: PageTheme) -> &FieldMap {
        match theme {
            PageTheme::Classic => &self.classic,
            PageTheme::Beta => &self.beta,
        }
    }
}
