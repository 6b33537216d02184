//! Profile pages, watch lists and submission statistics

use crate::extract::{Converter, DualFieldMap, FieldMap};
use crate::maps::custom::{
    beta_row_value, classic_contact_value, comments_link_count, next_form, previous_form,
};
use crate::maps::pick::*;

const CLASSIC_PROFILE: &str = "#page-userpage > tbody > tr:nth-child(1) > td > table > tbody > tr > td > table > tbody > tr > td > table > tbody";
const CLASSIC_TOP_JOURNAL: &str =
    "#page-userpage > tbody > tr:nth-child(2) > td:nth-child(2) > table:nth-child(1)";
const BETA_NAME: &str = "#user-profile .user-profile-main .username h2 span";
const BETA_FEATURED: &str = "section.userpage-left-column:nth-child(1) div.section-body";
const BETA_TOP_JOURNAL: &str = "section.userpage-right-column:nth-child(2)";
const BETA_PROFILE_ID: &str = "section.userpage-right-column:nth-child(3) .section-submission";

/// Thumbnails on the profile's latest-submissions and favorites strips
fn thumb_strip(img: &str) -> FieldMap {
    FieldMap::new()
        .field("id", figure_id())
        .field("self_link", link(VIEW_LINK))
        .field("thumb_url", image(&format!("{} img", VIEW_LINK)))
        .field("when", thumbnail_date(img))
}

fn profile_id() -> FieldMap {
    let img = format!("{} > img", VIEW_LINK);
    FieldMap::new()
        .field("id", view_id(VIEW_LINK))
        .field("self_link", link(VIEW_LINK))
        .field("thumb_url", image(&img))
        .field("when", thumbnail_date(&img))
}

fn classic_user_page() -> FieldMap {
    let strip_img = format!("{} img", VIEW_LINK);
    let journal = format!("b > {}", JOURNAL_LINK);

    FieldMap::new()
        .field(
            "user_name",
            text("#page-userpage table.maintable > tbody tr td.lead b")
                .convert(Converter::StripTilde),
        )
        .field(
            "user_class",
            capture(
                &format!("{} > tr:nth-child(2) > td.lead", CLASSIC_PROFILE),
                None,
                PARENS,
                1,
                false,
            ),
        )
        .field("self_link", param("self_link"))
        .field(
            "user_thumb_url",
            image(&format!("#page-userpage {} > img.avatar", USER_LINK)),
        )
        .field(
            "header_text",
            text(&format!(
                "{} > tr:nth-child(3) > td.alt1 > table > tbody > tr > td:nth-child(1)",
                CLASSIC_PROFILE
            )),
        )
        .field(
            "header_html",
            html(&format!(
                "{} > tr:nth-child(3) > td.alt1 > table > tbody > tr > td:nth-child(1)",
                CLASSIC_PROFILE
            )),
        )
        .field(
            "statistics_text",
            text(&format!(
                "{} > tr:nth-child(3) > td.alt1 > table > tbody > tr > td:nth-child(2) > table > tbody > tr:nth-child(2) > td",
                CLASSIC_PROFILE
            )),
        )
        .field(
            "statistics_html",
            html(&format!(
                "{} > tr:nth-child(3) > td.alt1 > table > tbody > tr > td:nth-child(2) > table > tbody > tr:nth-child(2) > td",
                CLASSIC_PROFILE
            )),
        )
        .field(
            "featured_submission",
            record(
                "#featured-submission",
                FieldMap::new()
                    .field("id", split_id("b", "id", '_'))
                    .field("self_link", link(VIEW_LINK))
                    .field("title", text("b > span"))
                    .field("thumb_url", image(&format!("{} > img", VIEW_LINK))),
            ),
        )
        .field(
            "latest_submissions",
            list(
                "#gallery-latest-submissions figure[id*='sid-']",
                thumb_strip(&strip_img),
            ),
        )
        .field(
            "favorites",
            list(
                "#gallery-latest-favorites figure[id*='sid-']",
                thumb_strip(&strip_img),
            ),
        )
        .field(
            "top_journal",
            record(
                CLASSIC_TOP_JOURNAL,
                FieldMap::new()
                    .field("id", journal_id(&journal))
                    .field("self_link", link(&journal))
                    .field("title", text(&journal))
                    .field("body_text", text(".journal-body"))
                    .field("body_html", html(".journal-body"))
                    .field("when", when("td > span.popup_date"))
                    .field(
                        "comment_count",
                        custom("", "comments_link_count", comments_link_count),
                    ),
            ),
        )
        .field(
            "profile_id",
            record("#profilepic-submission", profile_id()),
        )
        .field(
            "artist_information",
            list(
                "table > tbody > tr > td.user-info div.user-info-item",
                FieldMap::new()
                    .field("title", text("strong"))
                    .field("value", capture("", None, COLON_POST, 1, false)),
            ),
        )
        .field(
            "contact_information",
            list(
                "table > tbody > tr > td.user-contacts .classic-contact-info-item",
                FieldMap::new()
                    .field(
                        "service",
                        capture(".contact-service-name > strong", None, COLON_PRE, 1, false),
                    )
                    .field("link", link("a"))
                    .field(
                        "value",
                        custom("", "classic_contact_value", classic_contact_value),
                    ),
            ),
        )
        .field(
            "shouts",
            list(
                "table[id*='shout-']",
                FieldMap::new()
                    .field("id", split_id("", "id", '-'))
                    .field("user_name", text(&format!(".from-header > {}", USER_LINK)))
                    .field("user_url", link(&format!(".from-header > {}", USER_LINK)))
                    .field(
                        "user_thumb_url",
                        image(&format!("{} > img.avatar", USER_LINK)),
                    )
                    .field("body_text", text("div.no_overflow"))
                    .field("body_html", html("div.no_overflow"))
                    .field("when", when("td > span.popup_date")),
            ),
        )
}

fn beta_user_page() -> FieldMap {
    let strip_img = format!("{} > img", VIEW_LINK);
    let row = || {
        FieldMap::new()
            .field("title", text("strong"))
            .field("value", custom("", "beta_row_value", beta_row_value))
    };

    FieldMap::new()
        .field("user_name", text(BETA_NAME).convert(Converter::StripTilde))
        .field(
            "user_class",
            capture(BETA_NAME, Some("title"), COLON_POST, 1, false),
        )
        .field("self_link", param("self_link"))
        .field("user_thumb_url", image("#user-profile img.user-nav-avatar"))
        .field(
            "header_text",
            text("#page-userpage .userpage-layout-profile-container div.userpage-profile"),
        )
        .field(
            "header_html",
            html("#page-userpage .userpage-layout-profile-container div.userpage-profile"),
        )
        .field(
            "statistics_text",
            text("section.userpage-right-column:nth-child(1) div.section-body div.table"),
        )
        .field(
            "statistics_html",
            html("section.userpage-right-column:nth-child(1) div.section-body div.table"),
        )
        .field(
            "featured_submission",
            record(
                BETA_FEATURED,
                FieldMap::new()
                    .field("id", view_id(VIEW_LINK))
                    .field("self_link", link(VIEW_LINK))
                    .field(
                        "title",
                        text(&format!("div.userpage-featured-title {}", VIEW_LINK)),
                    )
                    .field("thumb_url", image(&format!("{} > img", VIEW_LINK))),
            ),
        )
        .field(
            "latest_submissions",
            list(
                "#gallery-latest-submissions figure[id*='sid-']",
                thumb_strip(&strip_img),
            ),
        )
        .field(
            "favorites",
            list(
                "#gallery-latest-favorites figure[id*='sid-']",
                thumb_strip(&strip_img),
            ),
        )
        .field(
            "top_journal",
            record(
                BETA_TOP_JOURNAL,
                FieldMap::new()
                    .field("id", journal_id(JOURNAL_LINK))
                    .field("self_link", link(JOURNAL_LINK))
                    .field("title", text(".section-body > h2"))
                    .field("body_text", text(".section-body > div.user-submitted-links"))
                    .field("body_html", html(".section-body > div.user-submitted-links"))
                    .field("when", when(".section-body span.popup_date"))
                    .field(
                        "comment_count",
                        capture(
                            &format!("{} span", JOURNAL_LINK),
                            None,
                            PARENS_NUMBER,
                            1,
                            true,
                        ),
                    ),
            ),
        )
        .field("profile_id", record(BETA_PROFILE_ID, profile_id()))
        .field(
            "artist_information",
            list("#userpage-contact-item div.table-row", row()),
        )
        .field(
            "contact_information",
            list(
                "#userpage-contact div.user-contact-item div.user-contact-user-info",
                FieldMap::new()
                    .field("service", text("strong"))
                    .field("link", link("a"))
                    .field("value", custom("", "beta_row_value", beta_row_value)),
            ),
        )
        .field(
            "shouts",
            list(
                "#page-userpage section.userpage-right-column:nth-child(4) .comment_container",
                FieldMap::new()
                    .field("id", split_id("a[id*='shout-'].comment_anchor", "id", '-'))
                    .field(
                        "user_name",
                        text(&format!(".comment_username {} h3", USER_LINK)),
                    )
                    .field(
                        "user_url",
                        link(&format!(".comment_username {}", USER_LINK)),
                    )
                    .field("user_thumb_url", image("img.comment_useravatar"))
                    .field("body_text", text(".shout-base .comment_text"))
                    .field("body_html", html(".shout-base .comment_text"))
                    .field("when", when(".shout-date > span.popup_date")),
            ),
        )
}

pub fn user_page_map() -> DualFieldMap {
    DualFieldMap::new(classic_user_page(), beta_user_page())
}

/// One page of a watch list, in either direction
pub fn watchlist_map() -> DualFieldMap {
    let user = || {
        FieldMap::new()
            .field("user_name", text(""))
            .field("user_url", link(""))
    };
    let listing = |items: &str| {
        FieldMap::new()
            .field("items", list(items, user()))
            .field("self_link", param("self_link"))
            .field("next", custom("", "next_form", next_form))
            .field("previous", custom("", "previous_form", previous_form))
    };

    DualFieldMap::new(
        listing(&format!("div.watch-list-items {}", USER_LINK)),
        listing(&format!("div.watch-list div.watch-row {}", USER_LINK)),
    )
}

/// Per-submission counters on a user's statistics page
pub fn statistics_map() -> DualFieldMap {
    let item = || {
        FieldMap::new()
            .field("id", view_id(VIEW_LINK))
            .field("submission_title", text("div.stats-title"))
            .field("submission_url", link(VIEW_LINK))
            .field("thumb_url", image(THUMB_IMG))
            .field("when", thumbnail_date(THUMB_IMG))
            .field("views", integer("span.views"))
            .field("favorites", integer("span.favorites"))
            .field("comments", integer("span.comments"))
            .field("keywords", folded("div.stats-keywords a", text("")))
    };

    DualFieldMap::new(
        FieldMap::new()
            .field("user_name", param("user_name"))
            .field("statistics", list("table.maintable div.stats-container", item())),
        FieldMap::new()
            .field("user_name", param("user_name"))
            .field("statistics", list("#columnpage div.stats-container", item())),
    )
}
