use crate::extract::fieldmap::{Converter, Css, DualFieldMap, Extractable, FieldMap, Rule};
use crate::extract::theme::{detect_theme, PageTheme};
use crate::extract::ExtractContext;
use crate::normalize;
use chrono::{DateTime, SecondsFormat, Utc};
use scraper::{ElementRef, Html};
use serde_json::{Map, Value};

/// A record extracted from one page, with the theme it was rendered in
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub theme: PageTheme,
    pub record: Map<String, Value>,
}

/// Parses a page body and extracts a record with the matching rule set
pub fn extract(body: &str, map: &DualFieldMap, ctx: &ExtractContext) -> Extraction {
    let document = Html::parse_document(body);
    extract_document(&document, map, ctx)
}

/// Extracts a record from an already parsed document
pub fn extract_document(document: &Html, map: &DualFieldMap, ctx: &ExtractContext) -> Extraction {
    let theme = detect_theme(document);
    tracing::debug!("Extracting with {} rules", theme);

    let record = resolve_map(map.for_theme(theme), document.root_element(), ctx);
    Extraction { theme, record }
}

/// Resolves every field of `map` against `scope`
pub fn resolve_map(map: &FieldMap, scope: ElementRef<'_>, ctx: &ExtractContext) -> Map<String, Value> {
    map.fields()
        .iter()
        .map(|field| (field.name.to_string(), resolve_rule(&field.rule, scope, ctx)))
        .collect()
}

fn resolve_rule(rule: &Rule, scope: ElementRef<'_>, ctx: &ExtractContext) -> Value {
    match rule {
        Rule::Scalar {
            selector,
            extract,
            convert,
        } => resolve_scalar(selector.as_ref(), extract, convert.as_ref(), scope, ctx),
        Rule::List {
            selector,
            item,
            fold,
        } => resolve_list(selector, item, *fold, scope, ctx),
        Rule::Record { scope: inner, map } => match inner {
            None => Value::Object(resolve_map(map, scope, ctx)),
            Some(css) => match first_match(css, scope) {
                Some(element) => Value::Object(resolve_map(map, element, ctx)),
                None => Value::Null,
            },
        },
    }
}

fn resolve_scalar(
    selector: Option<&Css>,
    extract: &Extractable,
    convert: Option<&Converter>,
    scope: ElementRef<'_>,
    ctx: &ExtractContext,
) -> Value {
    let raw = match extract {
        Extractable::Fixed(value) => value.clone(),
        Extractable::Param(name) => ctx.param(name),
        Extractable::Exists => {
            let found = match selector {
                Some(css) => first_match(css, scope).is_some(),
                None => true,
            };
            return Value::Bool(found);
        }
        _ => {
            let element = match selector {
                Some(css) => first_match(css, scope),
                None => Some(scope),
            };
            match element {
                Some(element) => read_element(element, extract, ctx),
                None => Value::Null,
            }
        }
    };

    match convert {
        Some(converter) => apply_converter(converter, raw),
        None => raw,
    }
}

fn read_element(element: ElementRef<'_>, extract: &Extractable, ctx: &ExtractContext) -> Value {
    match extract {
        Extractable::Attr(name) => element
            .value()
            .attr(name)
            .map(|v| Value::String(v.trim().to_string()))
            .unwrap_or(Value::Null),
        Extractable::Text => Value::String(text_of(element)),
        Extractable::Html => Value::String(element.inner_html().trim().to_string()),
        Extractable::When => when_value(element, ctx),
        Extractable::Custom(custom) => (custom.func)(element, ctx),
        Extractable::Exists => Value::Bool(true),
        Extractable::Fixed(value) => value.clone(),
        Extractable::Param(name) => ctx.param(name),
    }
}

fn resolve_list(
    selector: &Css,
    item: &FieldMap,
    fold: bool,
    scope: ElementRef<'_>,
    ctx: &ExtractContext,
) -> Value {
    let Some(parsed) = selector.selector() else {
        return Value::Array(Vec::new());
    };

    let records = scope.select(parsed).map(|element| resolve_map(item, element, ctx));

    if fold && item.len() == 1 {
        Value::Array(
            records
                .filter_map(|record| record.into_iter().next().map(|(_, value)| value))
                .filter(|value| !value.is_null())
                .collect(),
        )
    } else {
        Value::Array(records.map(Value::Object).collect())
    }
}

/// First descendant of `scope` matching `css`
///
/// A selector that failed to parse never matches.
pub fn first_match<'a>(css: &Css, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
    scope.select(css.selector()?).next()
}

/// Concatenated, trimmed text of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reads a date from an element's text, falling back to its `title`
pub fn when_value(element: ElementRef<'_>, ctx: &ExtractContext) -> Value {
    let tz = ctx.timezone.as_ref();
    let from_text = normalize::read_date_when(&text_of(element), tz);
    let parsed = from_text.or_else(|| {
        element
            .value()
            .attr("title")
            .and_then(|title| normalize::read_date_when(title, tz))
    });
    date_value(parsed)
}

/// Renders an optional instant as an RFC 3339 string value
pub fn date_value(date: Option<DateTime<Utc>>) -> Value {
    date.map(|d| Value::String(d.to_rfc3339_opts(SecondsFormat::Secs, true)))
        .unwrap_or(Value::Null)
}

fn number_value(n: Option<impl Into<serde_json::Number>>) -> Value {
    n.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)
}

/// Applies a converter to a raw value
///
/// Converters work on strings; other values pass through, except that a
/// missing class attribute counts as "not contained".
pub fn apply_converter(converter: &Converter, raw: Value) -> Value {
    let text = match raw {
        Value::String(s) => s,
        Value::Null => {
            return match converter {
                Converter::ClassContains { .. } => Value::Bool(false),
                _ => Value::Null,
            }
        }
        other => return other,
    };

    match converter {
        Converter::FixUrl => Value::String(normalize::fix_url(&text)),
        Converter::Int => number_value(normalize::leading_int(&text)),
        Converter::ViewId => number_value(normalize::view_id(&text)),
        Converter::JournalId => number_value(normalize::journal_id(&text)),
        Converter::SplitId { separator } => number_value(normalize::split_id(&text, *separator)),
        Converter::ThumbnailDate => date_value(normalize::thumbnail_date(&text)),
        Converter::UnixTimestamp => date_value(normalize::unix_timestamp(&text)),
        Converter::Regex {
            pattern,
            group,
            numeric,
        } => {
            let captured = pattern
                .captures(&text)
                .and_then(|caps| caps.get(*group))
                .map(|m| m.as_str().trim().to_string());
            match captured {
                Some(value) if *numeric => number_value(normalize::leading_int(&value)),
                Some(value) => Value::String(value),
                None => Value::Null,
            }
        }
        Converter::StripTilde => Value::String(normalize::strip_tilde(&text)),
        Converter::Unquote => Value::String(normalize::unquote(&text)),
        Converter::ClassContains { class } => Value::Bool(text.contains(class)),
        Converter::Trim => Value::String(text.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fieldmap::Custom;
    use chrono_tz::Tz;
    use regex::Regex;
    use serde_json::json;

    fn scalar(selector: Option<&str>, extract: Extractable) -> Rule {
        Rule::Scalar {
            selector: selector.map(Css::new),
            extract,
            convert: None,
        }
    }

    fn gallery_map() -> DualFieldMap {
        let item = |title_sel: &str| {
            FieldMap::new()
                .field(
                    "id",
                    scalar(None, Extractable::Attr("id".into()))
                        .convert(Converter::SplitId { separator: '-' }),
                )
                .field("title", scalar(Some(title_sel), Extractable::Text))
                .field(
                    "thumb_url",
                    scalar(Some("img"), Extractable::Attr("src".into())).convert(Converter::FixUrl),
                )
                .field(
                    "when",
                    scalar(Some("img"), Extractable::Attr("src".into()))
                        .convert(Converter::ThumbnailDate),
                )
        };

        DualFieldMap::new(
            FieldMap::new()
                .field("self_link", scalar(None, Extractable::Param("self_link")))
                .field(
                    "items",
                    Rule::List {
                        selector: Css::new("section.gallery figure"),
                        item: item("figcaption p.t"),
                        fold: false,
                    },
                ),
            FieldMap::new()
                .field("self_link", scalar(None, Extractable::Param("self_link")))
                .field(
                    "items",
                    Rule::List {
                        selector: Css::new("section.gallery figure"),
                        item: item("figcaption a[href*='/view/']"),
                        fold: false,
                    },
                ),
        )
    }

    const CLASSIC_GALLERY: &str = r#"<html><body data-static-path="/themes/classic">
        <section class="gallery">
          <figure id="sid-101"><img src="//t.furaffinity.net/101@200-1600000000.jpg">
            <figcaption><p class="t">First</p></figcaption></figure>
          <figure id="sid-102"><img src="//t.furaffinity.net/102@200-1600000000.jpg">
            <figcaption><p class="t">Second</p></figcaption></figure>
        </section></body></html>"#;

    const BETA_GALLERY: &str = r#"<html><body data-static-path="/themes/beta">
        <section class="gallery">
          <figure id="sid-101"><img src="//t.furaffinity.net/101@200-1600000000.jpg">
            <figcaption><a href="/view/101/">First</a></figcaption></figure>
          <figure id="sid-102"><img src="//t.furaffinity.net/102@200-1600000000.jpg">
            <figcaption><a href="/view/102/">Second</a></figcaption></figure>
        </section></body></html>"#;

    fn ctx() -> ExtractContext {
        ExtractContext::default().with_param("self_link", "/gallery/someone/")
    }

    #[test]
    fn test_both_themes_produce_same_schema() {
        let map = gallery_map();
        let classic = extract(CLASSIC_GALLERY, &map, &ctx());
        let beta = extract(BETA_GALLERY, &map, &ctx());

        assert_eq!(classic.theme, PageTheme::Classic);
        assert_eq!(beta.theme, PageTheme::Beta);
        assert_eq!(classic.record, beta.record);

        let expected = json!({
            "self_link": "/gallery/someone/",
            "items": [
                {
                    "id": 101,
                    "title": "First",
                    "thumb_url": "https://t.furaffinity.net/101@200-1600000000.jpg",
                    "when": "2020-09-13T12:26:40Z"
                },
                {
                    "id": 102,
                    "title": "Second",
                    "thumb_url": "https://t.furaffinity.net/102@200-1600000000.jpg",
                    "when": "2020-09-13T12:26:40Z"
                }
            ]
        });
        assert_eq!(Value::Object(classic.record), expected);
    }

    #[test]
    fn test_double_extraction_is_identical() {
        let map = gallery_map();
        let first = extract(BETA_GALLERY, &map, &ctx());
        let second = extract(BETA_GALLERY, &map, &ctx());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_fields_are_null_not_errors() {
        let map = DualFieldMap::new(
            FieldMap::new()
                .field("title", scalar(Some("h2.missing"), Extractable::Text))
                .field("link", scalar(Some("a.missing"), Extractable::Attr("href".into())))
                .field("present", scalar(Some("p.missing"), Extractable::Exists))
                .field(
                    "nested",
                    Rule::Record {
                        scope: Some(Css::new("#featured")),
                        map: FieldMap::new().field("x", scalar(Some("b"), Extractable::Text)),
                    },
                )
                .field(
                    "list",
                    Rule::List {
                        selector: Css::new("li.none"),
                        item: FieldMap::new().field("v", scalar(None, Extractable::Text)),
                        fold: true,
                    },
                ),
            FieldMap::new(),
        );

        let extraction = extract("<html><body><p>nothing</p></body></html>", &map, &ctx());
        assert_eq!(
            Value::Object(extraction.record),
            json!({
                "title": null,
                "link": null,
                "present": false,
                "nested": null,
                "list": []
            })
        );
    }

    #[test]
    fn test_bad_selector_resolves_as_absent() {
        let map = DualFieldMap::new(
            FieldMap::new()
                .field("broken", scalar(Some("a["), Extractable::Text))
                .field(
                    "broken_list",
                    Rule::List {
                        selector: Css::new("li:contains('x')"),
                        item: FieldMap::new().field("v", scalar(None, Extractable::Text)),
                        fold: true,
                    },
                ),
            FieldMap::new(),
        );

        let extraction = extract("<html><body><a href='/x'>x</a><li>x</li></body></html>", &map, &ctx());
        assert_eq!(extraction.record["broken"], Value::Null);
        assert_eq!(extraction.record["broken_list"], json!([]));
    }

    #[test]
    fn test_folded_list_drops_nulls() {
        let map = DualFieldMap::new(
            FieldMap::new()
                .field(
                    "keywords",
                    Rule::List {
                        selector: Css::new("#keywords > a"),
                        item: FieldMap::new().field("value", scalar(None, Extractable::Text)),
                        fold: true,
                    },
                )
                .field(
                    "nav_items",
                    Rule::List {
                        selector: Css::new("div.nav a"),
                        item: FieldMap::new().field(
                            "value",
                            scalar(None, Extractable::Attr("href".into())).convert(Converter::ViewId),
                        ),
                        fold: true,
                    },
                ),
            FieldMap::new(),
        );

        let html = r#"<html><body>
            <div id="keywords"><a>fox</a><a>forest</a></div>
            <div class="nav"><a href="/view/5/">a</a><a href="/user/x/">b</a><a href="/view/9/">c</a></div>
            </body></html>"#;
        let extraction = extract(html, &map, &ctx());
        assert_eq!(extraction.record["keywords"], json!(["fox", "forest"]));
        assert_eq!(extraction.record["nav_items"], json!([5, 9]));
    }

    #[test]
    fn test_when_uses_timezone_and_title_fallback() {
        let map = DualFieldMap::new(
            FieldMap::new()
                .field("visible", scalar(Some("#a"), Extractable::When))
                .field("tooltip", scalar(Some("#b"), Extractable::When))
                .field("neither", scalar(Some("#c"), Extractable::When)),
            FieldMap::new(),
        );
        let html = r#"<html><body>
            <span id="a" class="popup_date">Oct 24, 2024 08:01 PM</span>
            <span id="b" class="popup_date" title="Oct 24, 2024 08:01 PM">a week ago</span>
            <span id="c" class="popup_date"></span>
            </body></html>"#;

        let tz: Tz = "US/Pacific".parse().unwrap();
        let context = ExtractContext::new(Some(tz));
        let extraction = extract(html, &map, &context);
        assert_eq!(extraction.record["visible"], json!("2024-10-25T03:01:00Z"));
        assert_eq!(extraction.record["tooltip"], json!("2024-10-25T03:01:00Z"));
        assert_eq!(extraction.record["neither"], Value::Null);
    }

    #[test]
    fn test_fixed_and_custom_modes() {
        fn child_count(element: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
            json!(element.children().filter_map(ElementRef::wrap).count())
        }

        let map = DualFieldMap::new(
            FieldMap::new()
                .field("constant", scalar(Some("#nowhere"), Extractable::Fixed(json!(7))))
                .field(
                    "children",
                    scalar(
                        Some("ul"),
                        Extractable::Custom(Custom {
                            name: "child_count",
                            func: child_count,
                        }),
                    ),
                ),
            FieldMap::new(),
        );
        let extraction = extract("<html><body><ul><li>1</li><li>2</li></ul></body></html>", &map, &ctx());
        assert_eq!(extraction.record["constant"], json!(7));
        assert_eq!(extraction.record["children"], json!(2));
    }

    #[test]
    fn test_converters() {
        let s = |v: &str| Value::String(v.to_string());
        assert_eq!(apply_converter(&Converter::Int, s("42")), json!(42));
        assert_eq!(apply_converter(&Converter::Int, s("n/a")), Value::Null);
        assert_eq!(apply_converter(&Converter::JournalId, s("/journal/8/")), json!(8));
        assert_eq!(apply_converter(&Converter::StripTilde, s("~fox")), json!("fox"));
        assert_eq!(apply_converter(&Converter::Unquote, s("\"T\"")), json!("T"));
        assert_eq!(
            apply_converter(&Converter::ClassContains { class: "unread" }, s("note unread")),
            json!(true)
        );
        assert_eq!(
            apply_converter(&Converter::ClassContains { class: "unread" }, Value::Null),
            json!(false)
        );
        assert_eq!(
            apply_converter(&Converter::UnixTimestamp, s("1600000000")),
            json!("2020-09-13T12:26:40Z")
        );

        let parens = Converter::Regex {
            pattern: Regex::new(r"\((\S*?)\)").unwrap(),
            group: 1,
            numeric: true,
        };
        assert_eq!(apply_converter(&parens, s("Comments (12)")), json!(12));
        assert_eq!(apply_converter(&parens, s("Comments")), Value::Null);

        let colon = Converter::Regex {
            pattern: Regex::new(r": (.*?)$").unwrap(),
            group: 1,
            numeric: false,
        };
        assert_eq!(apply_converter(&colon, s("Species: Fox")), json!("Fox"));
        assert_eq!(apply_converter(&Converter::Int, json!(3)), json!(3));
    }
}
