//! Extraction logic that needs more than one selector
//!
//! Each function here is referenced by name from a field map through
//! [`Extractable::Custom`](crate::extract::Extractable::Custom).

use crate::extract::extractor::text_of;
use crate::extract::ExtractContext;
use crate::maps::pick::{JOURNAL_LINK, PARENS};
use crate::models::SubmissionType;
use crate::normalize::{fix_url, leading_int};
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Selector};
use serde_json::Value;

fn first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    scope.select(&selector).next()
}

fn all<'a>(scope: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Content kind and content URL of a submission page
///
/// Checked in order: an audio player means music, a story or poetry preview
/// means story, a preview image means image, an embedded object means flash.
/// The audio check comes first because music pages also carry a cover image.
pub fn classify_submission(
    container: ElementRef<'_>,
    story_scope: &str,
) -> Option<(SubmissionType, Option<String>)> {
    let preview = first(container, "#submissionImg");
    let preview_src = preview.and_then(|img| img.value().attr("src")).unwrap_or("");

    let audio = first(container, "audio");
    if audio.is_some() || preview_src.contains("/music/") {
        let source = audio.and_then(|a| {
            a.value()
                .attr("src")
                .or_else(|| first(a, "source[src]").and_then(|s| s.value().attr("src")))
        });
        return Some((SubmissionType::Music, source.map(fix_url)));
    }

    if preview_src.contains("/stories/") || preview_src.contains("poetry") {
        let scoped = match story_scope {
            "" => None,
            scope => first(container, &format!("{} a[href*='/stories/']", scope)),
        };
        let story = scoped
            .or_else(|| first(container, "a[href*='/stories/']"))
            .and_then(|a| a.value().attr("href"));
        return Some((SubmissionType::Story, story.map(fix_url)));
    }

    if let Some(img) = preview.filter(|_| !preview_src.is_empty()) {
        let full = img
            .value()
            .attr("data-fullview-src")
            .unwrap_or(preview_src);
        return Some((SubmissionType::Image, Some(fix_url(full))));
    }

    if let Some(object) = first(container, "object") {
        let data = object.value().attr("data").map(fix_url);
        return Some((SubmissionType::Flash, data));
    }

    None
}

pub fn submission_type(container: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    classify_submission(container, "")
        .map(|(kind, _)| Value::from(kind.as_str()))
        .unwrap_or(Value::Null)
}

fn content_value(found: Option<(SubmissionType, Option<String>)>) -> Value {
    found
        .and_then(|(_, url)| url)
        .map(Value::String)
        .unwrap_or(Value::Null)
}

pub fn content_url_classic(container: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    content_value(classify_submission(container, "#text-container"))
}

pub fn content_url_beta(container: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    content_value(classify_submission(container, "#submission-content"))
}

/// Action of the form whose button reads `label`
fn form_with_button(scope: ElementRef<'_>, label: &str) -> Value {
    all(scope, "form")
        .into_iter()
        .find(|form| {
            form.children()
                .filter_map(ElementRef::wrap)
                .any(|child| child.value().name() == "button" && text_of(child).contains(label))
        })
        .and_then(|form| form.value().attr("action"))
        .map(|action| Value::String(fix_url(action)))
        .unwrap_or(Value::Null)
}

pub fn next_form(scope: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    form_with_button(scope, "Next")
}

pub fn previous_form(scope: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    form_with_button(scope, "Prev")
}

/// Count from a journal link reading `Comments (12)`
pub fn comments_link_count(scope: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    let Ok(parens) = Regex::new(PARENS) else {
        return Value::Null;
    };

    all(scope, JOURNAL_LINK)
        .into_iter()
        .map(text_of)
        .find(|text| text.contains("Comments"))
        .and_then(|text| {
            parens
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| leading_int(m.as_str()))
        })
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Trimmed text of the text node directly after `element`
fn text_after(element: ElementRef<'_>) -> Option<String> {
    let sibling = element.next_sibling()?;
    match sibling.value() {
        Node::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn element_children(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap).collect()
}

/// Value of a classic contact row: `<strong>Service</strong> value` or a
/// second element holding the value
pub fn classic_contact_value(item: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    let children = element_children(item);
    let value = match children.as_slice() {
        [_, second, ..] => Some(text_of(*second)),
        [only] => text_after(*only),
        [] => None,
    };
    value.map(Value::String).unwrap_or(Value::Null)
}

/// Value of a beta profile row: a linked value as third element, otherwise
/// the text following the label elements
pub fn beta_row_value(item: ElementRef<'_>, _ctx: &ExtractContext) -> Value {
    let children = element_children(item);
    let value = match children.as_slice() {
        [_, _, third, ..] => Some(text_of(*third)),
        [_, second] => text_after(*second),
        [only] => text_after(*only),
        [] => None,
    };
    value.map(Value::String).unwrap_or(Value::Null)
}
