//! Submission listings: the inbox, user folders and search results
//!
//! Listing maps share one record shape: `items`, `self_link`, `next` and
//! `previous`, which decodes into [`ListingPage`](crate::paginate::ListingPage).

use crate::extract::{DualFieldMap, FieldMap, Rule};
use crate::maps::custom::{next_form, previous_form};
use crate::maps::pick::*;
use crate::models::GalleryKind;

fn listing(items: Rule, next: Rule, previous: Rule) -> FieldMap {
    FieldMap::new()
        .field("items", items)
        .field("self_link", param("self_link"))
        .field("next", next)
        .field("previous", previous)
}

/// New submissions in the message center
pub fn inbox_map() -> DualFieldMap {
    let classic_items = FieldMap::new()
        .field("id", checkbox_id())
        .field("self_link", link("b > u > a"))
        .field("title", text("figcaption > label > p:nth-child(2) > a"))
        .field("artist_name", text("figcaption > label > p:nth-child(3) > a"))
        .field("thumb_url", image("b > u > a > img"))
        .field("when", thumbnail_date("b > u > a > img"));

    let beta_items = FieldMap::new()
        .field("id", checkbox_id())
        .field("self_link", link(VIEW_LINK))
        .field("title", text(&format!("figcaption label p {}", VIEW_LINK)))
        .field("artist_name", text(&format!("figcaption label p {}", USER_LINK)))
        .field("thumb_url", image(&format!("{} > img", VIEW_LINK)))
        .field("when", thumbnail_date(&format!("{} > img", VIEW_LINK)));

    DualFieldMap::new(
        listing(
            list("figure.t-image", classic_items),
            link("#messages-form .navigation a[class*='more']:not(.prev)"),
            link("#messages-form .navigation a[class*='more'].prev"),
        ),
        listing(
            list("#messagecenter-submissions figure.t-image", beta_items),
            link("#messagecenter-new-submissions div > a[class*='more']:not(.prev)"),
            link("#messagecenter-new-submissions div > a[class*='more'].prev"),
        ),
    )
}

/// A user's gallery, scraps or favorites
///
/// Beta galleries page through form buttons; scraps and favorites use plain
/// pagination links.
pub fn gallery_map(kind: GalleryKind) -> DualFieldMap {
    let classic_items = FieldMap::new()
        .field("id", figure_id())
        .field("self_link", link("b > u > a"))
        .field("title", attr("figcaption > p:nth-child(1) > a", "title"))
        .field("artist_name", attr("figcaption > p:nth-child(2) > a", "title"))
        .field("thumb_url", image("b > u > a > img"))
        .field("when", thumbnail_date("b > u > a > img"));

    let beta_items = FieldMap::new()
        .field("id", figure_id())
        .field("self_link", link(VIEW_LINK))
        .field("title", text(&format!("figcaption p:nth-child(1) {}", VIEW_LINK)))
        .field("artist_name", text(&format!("figcaption p:nth-child(2) {}", USER_LINK)))
        .field("thumb_url", image(&format!("{} > img", VIEW_LINK)))
        .field("when", thumbnail_date(&format!("{} > img", VIEW_LINK)));

    let (beta_next, beta_previous) = match kind {
        GalleryKind::Gallery => (
            custom("", "next_form", next_form),
            custom("", "previous_form", previous_form),
        ),
        GalleryKind::Scraps | GalleryKind::Favorites => (
            link(".pagination a.button.right"),
            link(".pagination a.button.left"),
        ),
    };

    DualFieldMap::new(
        listing(
            list("section.gallery figure[id*='sid-']", classic_items),
            link("a.button-link.right"),
            link("a.button-link.left"),
        ),
        listing(
            list("section.gallery figure[id*='sid-']", beta_items),
            beta_next,
            beta_previous,
        ),
    )
}

/// One page of search results; `more` flags a following page
pub fn search_map() -> DualFieldMap {
    let items = || {
        FieldMap::new()
            .field("id", figure_id())
            .field("self_link", link(VIEW_LINK))
            .field("title", text(&format!("figcaption {}", VIEW_LINK)))
            .field("artist_name", text(&format!("figcaption {}", USER_LINK)))
            .field("thumb_url", image(THUMB_IMG))
            .field("when", thumbnail_date(THUMB_IMG))
    };

    DualFieldMap::new(
        FieldMap::new()
            .field("items", list("#gallery-search-results figure.t-image", items()))
            .field(
                "more",
                exists("fieldset#search-results button[type='submit'][name='next_page']"),
            ),
        FieldMap::new()
            .field("items", list("#gallery-search-results figure.t-image", items()))
            .field(
                "more",
                exists("div#search-results button[type='submit'][name='next_page']"),
            ),
    )
}
