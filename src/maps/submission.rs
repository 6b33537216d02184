//! Submission detail page and comment threads

use crate::extract::{DualFieldMap, FieldMap, PageTheme, Rule};
use crate::maps::custom::{content_url_beta, content_url_classic, submission_type};
use crate::maps::pick::*;

/// Comment thread inside `section`, for either theme
pub fn comments(section: &str, theme: PageTheme) -> Rule {
    match theme {
        PageTheme::Classic => list(
            &format!("{} table.container-comment", section),
            FieldMap::new()
                .field("id", split_id("", "id", ':'))
                .field("self_link", link("a.comment-link"))
                .field(
                    "user_name",
                    text("tbody > tr:nth-child(1) > td:nth-child(3) > div > ul > li > b"),
                )
                .field(
                    "user_url",
                    link("tbody > tr:nth-child(1) > td:nth-child(3) > div > ul > li > ul > li:nth-child(1) > a"),
                )
                .field("user_thumb_url", image("img.avatar"))
                .field("body_text", text("div.message-text"))
                .field("body_html", html("div.message-text"))
                .field("timestamp", timestamp(""))
                .field(
                    "when",
                    when("tbody > tr:nth-child(2) > th:nth-child(2) > h4 > span"),
                ),
        ),
        PageTheme::Beta => list(
            &format!("{} div.comment_container", section),
            FieldMap::new()
                .field("id", split_id("a.comment_anchor", "id", ':'))
                .field("self_link", link("a.comment-link"))
                .field("user_name", text("strong.comment_username > h3"))
                .field("user_url", link(&format!(".avatar-desktop > {}", USER_LINK)))
                .field(
                    "user_thumb_url",
                    image(&format!(".avatar-desktop > {} > img.comment_useravatar", USER_LINK)),
                )
                .field("body_text", text("div.comment_text"))
                .field("body_html", html("div.comment_text"))
                .field("timestamp", timestamp(""))
                .field("when", when(".comment-date span.popup_date")),
        ),
    }
}

const CLASSIC_BODY: &str = "#page-submission > table > tbody > tr:nth-child(1) > td > table > tbody > tr:nth-child(2) > td > table > tbody > tr:nth-child(2) > td";

pub fn submission_map() -> DualFieldMap {
    let classic_artist = format!(
        "#page-submission div.classic-submission-title.information > {}",
        USER_LINK
    );
    let classic = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("type", custom("#page-submission", "submission_type", submission_type))
        .field(
            "title",
            text("#page-submission div.classic-submission-title.information > h2"),
        )
        .field("thumb_url", url_attr("#submissionImg", "data-preview-src"))
        .field(
            "content_url",
            custom("#page-submission", "content_url_classic", content_url_classic),
        )
        .field("artist_name", text(&classic_artist))
        .field("artist_url", link(&classic_artist))
        .field(
            "artist_thumb_url",
            image(&format!(
                "#page-submission div.classic-submissiont-title.avatar {} > img",
                USER_LINK
            )),
        )
        .field("body_text", text(CLASSIC_BODY))
        .field("body_html", html(CLASSIC_BODY))
        .field(
            "when",
            when("#page-submission td.stats-container span.popup_date"),
        )
        .field("keywords", folded("#page-submission #keywords > a", text("")))
        .field(
            "nav_items",
            folded(
                &format!("#page-submission div.minigallery-container {}", VIEW_LINK),
                view_id(""),
            ),
        )
        .field("comments", comments("#comments-submission", PageTheme::Classic));

    let beta_artist = format!("#submission_page .submission-id-container {}", USER_LINK);
    let beta = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("type", custom("#submission_page", "submission_type", submission_type))
        .field("title", text("#submission_page div.submission-title p"))
        .field("thumb_url", url_attr("#submissionImg", "data-preview-src"))
        .field(
            "content_url",
            custom("#submission_page", "content_url_beta", content_url_beta),
        )
        .field("artist_name", text(&beta_artist))
        .field("artist_url", link(&beta_artist))
        .field(
            "artist_thumb_url",
            image(&format!(
                "#submission_page .submission-id-avatar {} > img",
                USER_LINK
            )),
        )
        .field("body_text", text("#submission_page div.submission-description"))
        .field("body_html", html("#submission_page div.submission-description"))
        .field(
            "when",
            when("#submission_page .submission-id-container span.popup_date"),
        )
        .field(
            "keywords",
            folded(
                "#submission_page div.submission-sidebar section.tags-row > span.tags > a",
                text(""),
            ),
        )
        .field(
            "nav_items",
            folded(
                &format!(
                    "#submission_page section.minigallery-more div.preview-gallery {}",
                    VIEW_LINK
                ),
                view_id(""),
            ),
        )
        .field("comments", comments("#comments-submission", PageTheme::Beta));

    DualFieldMap::new(classic, beta)
}
