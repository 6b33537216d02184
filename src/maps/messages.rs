//! Message center, notes and comment reply pages

use crate::extract::{Converter, DualFieldMap, FieldMap, Rule};
use crate::maps::pick::*;

fn submission_message(user_name: &str, title: Rule, when_sel: &str) -> FieldMap {
    FieldMap::new()
        .field("id", checkbox_id())
        .field("submission_id", view_id(VIEW_LINK))
        .field("submission_title", title)
        .field("submission_url", link(VIEW_LINK))
        .field("user_name", text(user_name))
        .field("user_url", link(USER_LINK))
        .field("when", when(when_sel))
}

fn journal_comment_message(when_sel: &str) -> FieldMap {
    FieldMap::new()
        .field("id", checkbox_id())
        .field("title", text(JOURNAL_LINK))
        .field("url", link(JOURNAL_LINK))
        .field("journal_id", journal_id(JOURNAL_LINK))
        .field("user_name", text(USER_LINK))
        .field("user_url", link(USER_LINK))
        .field("when", when(when_sel))
}

fn shout_message(when_sel: &str) -> FieldMap {
    FieldMap::new()
        .field("id", checkbox_id())
        .field("user_name", text(USER_LINK))
        .field("user_url", link(USER_LINK))
        .field("when", when(when_sel))
}

fn journal_message(user_name: &str, when_sel: &str) -> FieldMap {
    FieldMap::new()
        .field("id", checkbox_id())
        .field("journal_title", text(JOURNAL_LINK))
        .field("journal_url", link(JOURNAL_LINK))
        .field("user_name", text(user_name))
        .field("user_url", link(USER_LINK))
        .field("when", when(when_sel))
}

/// The "other messages" page
pub fn messages_map() -> DualFieldMap {
    let stream = "ul.message-stream > li:not(.section-controls)";
    let classic = FieldMap::new()
        .field(
            "my_username",
            text("a#my-username").convert(Converter::StripTilde),
        )
        .field(
            "watches",
            list(
                "ul#watches > li:not(.section-controls)",
                FieldMap::new()
                    .field("id", checkbox_id())
                    .field("user_name", text("div > span"))
                    .field("user_url", link("a"))
                    .field("user_thumb_url", image("img"))
                    .field("when", when("div > small > span")),
            ),
        )
        .field(
            "comments",
            list(
                "ul#comments > li:not(.section-controls)",
                submission_message(USER_LINK, text(VIEW_LINK), "span"),
            ),
        )
        .field(
            "journal_comments",
            list(
                &format!("fieldset#messages-comments-journal > {}", stream),
                journal_comment_message("span"),
            ),
        )
        .field(
            "shouts",
            list(
                &format!("fieldset#messages-shouts > {}", stream),
                shout_message("span"),
            ),
        )
        .field(
            "favorites",
            list(
                "ul#favorites > li:not(.section-controls)",
                submission_message(USER_LINK, text(VIEW_LINK), "span"),
            ),
        )
        .field(
            "journals",
            list(
                "ul#journals > li:not(.section-controls)",
                journal_message(USER_LINK, "span"),
            ),
        );

    let strong_user = format!("{} > strong", USER_LINK);
    let beta = FieldMap::new()
        .field(
            "my_username",
            text(&format!(".mobile-navigation article.mobile-menu h2 > {}", USER_LINK))
                .convert(Converter::StripTilde),
        )
        .field(
            "watches",
            list(
                "#messages-watches ul.message-stream > li",
                FieldMap::new()
                    .field("id", checkbox_id())
                    .field("user_name", text("div.info > span:nth-child(1)"))
                    .field("user_url", link(USER_LINK))
                    .field("user_thumb_url", image("img.avatar"))
                    .field("when", when("div.info span.popup_date")),
            ),
        )
        .field(
            "comments",
            list(
                "#messages-comments-submission ul.message-stream > li",
                submission_message(USER_LINK, text(VIEW_LINK), "span.popup_date"),
            ),
        )
        .field(
            "journal_comments",
            list(
                "#messages-comments-journal ul.message-stream > li",
                journal_comment_message("span.popup_date"),
            ),
        )
        .field(
            "shouts",
            list(
                "#messages-shouts ul.message-stream > li",
                shout_message("span.popup_date"),
            ),
        )
        .field(
            "favorites",
            list(
                "#messages-favorites ul.message-stream > li",
                submission_message(
                    &strong_user,
                    text(VIEW_LINK).convert(Converter::Unquote),
                    "span.popup_date",
                ),
            ),
        )
        .field(
            "journals",
            list(
                "#messages-journals ul.message-stream > li",
                journal_message(&strong_user, "span.popup_date"),
            ),
        );

    DualFieldMap::new(classic, beta)
}

/// The note inbox
pub fn notes_map() -> DualFieldMap {
    let unread = |selector: &str| {
        attr(selector, "class").convert(Converter::ClassContains { class: "unread" })
    };

    let classic = FieldMap::new().field(
        "notes",
        list(
            "#notes-list > tbody > tr.note",
            FieldMap::new()
                .field("id", checkbox_id())
                .field("self_link", link("td.subject > a"))
                .field("title", text("td.subject > a"))
                .field("user_name", text("td.col-from > a"))
                .field("user_url", link("td.col-from > a"))
                .field("unread", unread("td.subject > a"))
                .field("when", when("td:nth-child(3) > span")),
        ),
    );

    let sender = format!(".note-list-sender {}", USER_LINK);
    let beta = FieldMap::new().field(
        "notes",
        list(
            "#notes-list > div.message-center-pms-note-list-view",
            FieldMap::new()
                .field("id", checkbox_id())
                .field("self_link", link(r#"a[href*="/msg/pms/"]"#))
                .field("title", text("div.note-list-subject"))
                .field("user_name", text(&sender))
                .field("user_url", link(&sender))
                .field("unread", unread("div.note-list-subject"))
                .field("when", when(".note-list-senddate span.popup_date")),
        ),
    );

    DualFieldMap::new(classic, beta)
}

/// A single note
pub fn note_map() -> DualFieldMap {
    let classic_row = "#pms-form > table.maintable > tbody > tr:nth-child(2) > td";
    let classic_sender = format!("{} > font > a:nth-child(1)", classic_row);
    let classic = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("title", text("#pms-form > table.maintable > tbody > tr > td > font > b"))
        .field("user_name", text(&classic_sender))
        .field("user_url", link(&classic_sender))
        .field("body_text", text(classic_row))
        .field("body_html", html(classic_row))
        .field("when", when(&format!("{} span.popup_date", classic_row)));

    let beta_sender = format!("#message .addresses > {}:nth-child(2)", USER_LINK);
    let beta = FieldMap::new()
        .field("id", param("id"))
        .field("self_link", param("self_link"))
        .field("title", text("#message .addresses h2"))
        .field("user_name", text(&format!("{} > strong", beta_sender)))
        .field("user_url", link(&beta_sender))
        .field("body_text", text("#message .section-body div.user-submitted-links"))
        .field("body_html", html("#message .section-body div.user-submitted-links"))
        .field("when", when("#message .addresses span.popup_date"));

    DualFieldMap::new(classic, beta)
}

/// Raw text of one comment, from its reply page
pub fn comment_text_map() -> DualFieldMap {
    let classic_body = "#pageid-reply-to > div:nth-child(6) > form > table > tbody > tr > td > table:nth-child(1) > tbody > tr:nth-child(2) > td";
    let beta_body = "#site-content > form > table > tbody > tr > td > table:nth-child(1) > tbody > tr:nth-child(2) > td";

    DualFieldMap::new(
        FieldMap::new()
            .field("id", param("id"))
            .field("body_text", text(classic_body))
            .field("body_html", html(classic_body)),
        FieldMap::new()
            .field("id", param("id"))
            .field("body_text", text(beta_body))
            .field("body_html", html(beta_body)),
    )
}
