use crate::models::SubmissionListing;
use crate::transport::FormBody;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Relevancy,
    Date,
    Popularity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Desc,
    Asc,
}

/// How far back a search reaches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchRange {
    #[serde(rename = "24hours")]
    Day,
    #[serde(rename = "72hours")]
    ThreeDays,
    #[serde(rename = "30days")]
    Month,
    #[serde(rename = "90days")]
    ThreeMonths,
    #[serde(rename = "1year")]
    Year,
    #[serde(rename = "3years")]
    ThreeYears,
    #[default]
    #[serde(rename = "5years")]
    FiveYears,
    #[serde(rename = "all")]
    All,
}

impl SearchRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchRange::Day => "24hours",
            SearchRange::ThreeDays => "72hours",
            SearchRange::Month => "30days",
            SearchRange::ThreeMonths => "90days",
            SearchRange::Year => "1year",
            SearchRange::ThreeYears => "3years",
            SearchRange::FiveYears => "5years",
            SearchRange::All => "all",
        }
    }
}

/// How query terms combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Any,
    All,
    #[default]
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub general: bool,
    pub mature: bool,
    pub adult: bool,
}

impl Default for Ratings {
    fn default() -> Self {
        Self {
            general: true,
            mature: false,
            adult: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTypes {
    pub art: bool,
    pub flash: bool,
    pub photo: bool,
    pub music: bool,
    pub story: bool,
    pub poetry: bool,
}

impl Default for SubmissionTypes {
    fn default() -> Self {
        Self {
            art: true,
            flash: true,
            photo: true,
            music: true,
            story: true,
            poetry: true,
        }
    }
}

/// Search filters; every field has the site's default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// 24, 48 or 72
    pub perpage: u32,
    pub order_by: OrderBy,
    pub order_dir: OrderDirection,
    pub range: SearchRange,
    pub ratings: Ratings,
    pub types: SubmissionTypes,
    pub mode: SearchMode,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            perpage: 72,
            order_by: OrderBy::default(),
            order_dir: OrderDirection::default(),
            range: SearchRange::default(),
            ratings: Ratings::default(),
            types: SubmissionTypes::default(),
            mode: SearchMode::default(),
        }
    }
}

fn order_by_str(order: OrderBy) -> &'static str {
    match order {
        OrderBy::Relevancy => "relevancy",
        OrderBy::Date => "date",
        OrderBy::Popularity => "popularity",
    }
}

fn mode_str(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Any => "any",
        SearchMode::All => "all",
        SearchMode::Extended => "extended",
    }
}

impl SearchParams {
    /// Renders the POST body for one results page
    ///
    /// A filter group with nothing selected falls back to its default, since
    /// the site rejects a search without any rating or type.
    pub fn form_body(&self, query: &str, page: u32) -> FormBody {
        let mut body = FormBody::new()
            .with("q", query)
            .with("page", page)
            .with("perpage", self.perpage)
            .with("order-by", order_by_str(self.order_by))
            .with(
                "order-direction",
                match self.order_dir {
                    OrderDirection::Desc => "desc",
                    OrderDirection::Asc => "asc",
                },
            )
            .with("do_search", "Search")
            .with("range", self.range.as_str())
            .with("mode", mode_str(self.mode));

        let ratings = if self.ratings.general || self.ratings.mature || self.ratings.adult {
            self.ratings
        } else {
            Ratings::default()
        };
        for (enabled, key) in [
            (ratings.general, "rating-general"),
            (ratings.mature, "rating-mature"),
            (ratings.adult, "rating-adult"),
        ] {
            if enabled {
                body.push(key, "on");
            }
        }

        let t = self.types;
        let types = if t.art || t.flash || t.photo || t.music || t.story || t.poetry {
            t
        } else {
            SubmissionTypes::default()
        };
        for (enabled, key) in [
            (types.art, "type-art"),
            (types.flash, "type-flash"),
            (types.photo, "type-photo"),
            (types.music, "type-music"),
            (types.story, "type-story"),
            (types.poetry, "type-poetry"),
        ] {
            if enabled {
                body.push(key, "on");
            }
        }

        body
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SubmissionListing>,
    /// Whether the page offers a "next page" button
    #[serde(default)]
    pub more: bool,
}
