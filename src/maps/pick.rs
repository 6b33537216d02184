//! Shorthand constructors for field rules
//!
//! An empty selector string means "the context element itself".

use crate::extract::{Converter, Css, Custom, Extractable, FieldMap, Rule};
use crate::extract::fieldmap::CustomFn;
use regex::Regex;
use serde_json::Value;

pub const USER_LINK: &str = r#"a[href*="/user/"]"#;
pub const VIEW_LINK: &str = r#"a[href*="/view/"]"#;
pub const JOURNAL_LINK: &str = r#"a[href*="/journal/"]"#;
pub const THUMB_IMG: &str = r#"img[src*="//t.furaffinity.net/"]"#;
pub const CHECKBOX: &str = "input[type='checkbox']";

/// `(value)` → `value`
pub const PARENS: &str = r"\((\S*?)\)";
/// `(12 comments)` → `12`
pub const PARENS_NUMBER: &str = r"\((\d+).*\)";
/// `Species: Fox` → `Fox`
pub const COLON_POST: &str = r": (.*?)$";
/// `Website:` → `Website`
pub const COLON_PRE: &str = r"^(.*?):$";

fn css(selector: &str) -> Option<Css> {
    if selector.is_empty() {
        None
    } else {
        Some(Css::new(selector))
    }
}

pub fn scalar(selector: &str, extract: Extractable) -> Rule {
    Rule::Scalar {
        selector: css(selector),
        extract,
        convert: None,
    }
}

pub fn text(selector: &str) -> Rule {
    scalar(selector, Extractable::Text)
}

pub fn html(selector: &str) -> Rule {
    scalar(selector, Extractable::Html)
}

pub fn attr(selector: &str, name: &str) -> Rule {
    scalar(selector, Extractable::Attr(name.to_string()))
}

/// An attribute holding a URL
pub fn url_attr(selector: &str, name: &str) -> Rule {
    attr(selector, name).convert(Converter::FixUrl)
}

pub fn link(selector: &str) -> Rule {
    url_attr(selector, "href")
}

pub fn image(selector: &str) -> Rule {
    url_attr(selector, "src")
}

pub fn when(selector: &str) -> Rule {
    scalar(selector, Extractable::When)
}

pub fn exists(selector: &str) -> Rule {
    scalar(selector, Extractable::Exists)
}

/// Integer value of the row's selection checkbox
pub fn checkbox_id() -> Rule {
    attr(CHECKBOX, "value").convert(Converter::Int)
}

/// `sid-123` on a gallery `<figure>`
pub fn figure_id() -> Rule {
    split_id("", "id", '-')
}

pub fn split_id(selector: &str, name: &str, separator: char) -> Rule {
    attr(selector, name).convert(Converter::SplitId { separator })
}

pub fn view_id(selector: &str) -> Rule {
    attr(selector, "href").convert(Converter::ViewId)
}

pub fn journal_id(selector: &str) -> Rule {
    attr(selector, "href").convert(Converter::JournalId)
}

/// Upload time encoded in a thumbnail URL
pub fn thumbnail_date(selector: &str) -> Rule {
    attr(selector, "src").convert(Converter::ThumbnailDate)
}

/// `data-timestamp` unix seconds
pub fn timestamp(selector: &str) -> Rule {
    attr(selector, "data-timestamp").convert(Converter::UnixTimestamp)
}

pub fn integer(selector: &str) -> Rule {
    text(selector).convert(Converter::Int)
}

/// Capture group `group` of `pattern` over the element's text or attribute
pub fn capture(selector: &str, name: Option<&str>, pattern: &str, group: usize, numeric: bool) -> Rule {
    let base = match name {
        Some(name) => attr(selector, name),
        None => text(selector),
    };

    match Regex::new(pattern) {
        Ok(pattern) => base.convert(Converter::Regex {
            pattern,
            group,
            numeric,
        }),
        Err(e) => {
            tracing::warn!("Invalid field pattern '{}': {}", pattern, e);
            fixed(Value::Null)
        }
    }
}

pub fn fixed(value: impl Into<Value>) -> Rule {
    scalar("", Extractable::Fixed(value.into()))
}

/// A request-derived value from the extraction context
pub fn param(name: &'static str) -> Rule {
    scalar("", Extractable::Param(name))
}

pub fn custom(selector: &str, name: &'static str, func: CustomFn) -> Rule {
    scalar(selector, Extractable::Custom(Custom { name, func }))
}

/// One record per match
pub fn list(selector: &str, item: FieldMap) -> Rule {
    Rule::List {
        selector: Css::new(selector),
        item,
        fold: false,
    }
}

/// One value per match, nulls dropped
pub fn folded(selector: &str, value: Rule) -> Rule {
    Rule::List {
        selector: Css::new(selector),
        item: FieldMap::new().field("value", value),
        fold: true,
    }
}

/// A nested record; `null` when `scope` matches nothing
pub fn record(scope: &str, map: FieldMap) -> Rule {
    Rule::Record {
        scope: css(scope),
        map,
    }
}
