//! Journal pages and a user's journal listing

use crate::extract::{Converter, DualFieldMap, FieldMap, PageTheme};
use crate::maps::custom::comments_link_count;
use crate::maps::pick::*;
use crate::maps::submission::comments;

pub fn journal_map() -> DualFieldMap {
    let classic_user = format!("#page-journal td.journal-title-box {}", USER_LINK);
    let classic = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("title", text("#page-journal td.journal-title-box > b > font > div"))
        .field("user_name", text(&classic_user))
        .field("user_url", link(&classic_user))
        .field(
            "user_thumb_url",
            image(&format!("#page-journal td.avatar-box {} > img", USER_LINK)),
        )
        .field("body_text", text("div.journal-body"))
        .field("body_html", html("div.journal-body"))
        .field(
            "when",
            when("#page-journal td.journal-title-box span.popup_date"),
        )
        .field("comments", comments("#page-comments", PageTheme::Classic));

    let beta = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("title", text(".content .section-header h2.journal-title"))
        .field(
            "user_name",
            text("#user-profile .username h2 span").convert(Converter::StripTilde),
        )
        .field("user_url", link(&format!("#user-profile {}.current", USER_LINK)))
        .field(
            "user_thumb_url",
            image(&format!("#user-profile {}.current > img", USER_LINK)),
        )
        .field("body_text", text(".content .journal-item div.journal-content"))
        .field("body_html", html(".content .journal-item div.journal-content"))
        .field("when", when(".content .section-header span.popup_date"))
        .field("comments", comments("#comments-journal", PageTheme::Beta));

    DualFieldMap::new(classic, beta)
}

/// A page of a user's journals
pub fn journals_map() -> DualFieldMap {
    let classic_item = FieldMap::new()
        .field("id", split_id("", "id", ':'))
        .field("self_link", link(JOURNAL_LINK))
        .field(
            "title",
            text(&format!("tbody > tr > td > div.no_overflow {}", JOURNAL_LINK)),
        )
        .field("body_text", text("tbody > tr > td > div.no_overflow.alt1"))
        .field("body_html", html("tbody > tr > td > div.no_overflow.alt1"))
        .field("when", when("td > span.popup_date"))
        .field(
            "comment_count",
            custom("", "comments_link_count", comments_link_count),
        );

    let beta_item = FieldMap::new()
        .field("id", split_id("", "id", ':'))
        .field("self_link", link(JOURNAL_LINK))
        .field("title", text(".section-header h2"))
        .field("body_text", text(".section-body div.journal-body"))
        .field("body_html", html(".section-body div.journal-body"))
        .field("when", when(".section-header span.popup_date"))
        .field(
            "comment_count",
            integer(&format!("{} > span.font-large", JOURNAL_LINK)),
        );

    DualFieldMap::new(
        FieldMap::new()
            .field(
                "items",
                list("table.page-journals-list table.maintable[id*='jid:']", classic_item),
            )
            .field("self_link", param("self_link"))
            .field("next", link("a.button-link.right"))
            .field("previous", link("a.button-link.left")),
        FieldMap::new()
            .field("items", list("#columnpage .content section[id*='jid:']", beta_item))
            .field("self_link", param("self_link"))
            .field("next", link(".pagination a.button.right"))
            .field("previous", link(".pagination a.button.left")),
    )
}
