//! Filter criteria and their canonical query-string encoding.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::query::{QueryParams, QueryString};
use crate::domain::types::{FilterValue, PageLimit, PageNumber};

pub const DEFAULT_SORT: &str = "auction_date desc";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Lots requested for the home page grid.
pub const FEATURED_LIMIT: u32 = 100;
/// Recency window used by the home page when the URL carries no filters.
pub const FEATURED_NEWLY_ADDED: &str = "14d";

/// Keys the home page copies verbatim from its own URL into the search request.
pub const FEATURED_KEYS: [&str; 13] = [
    "make",
    "model",
    "year_min",
    "year_max",
    "price_min",
    "price_max",
    "state",
    "auction_house",
    "no_reserve",
    "body_style",
    "transmission",
    "newly_added",
    "sort",
];

/// User-selected filter values controlling a search request.
///
/// Text fields are `None` when empty or whitespace-only. `sort`, `page` and
/// `limit` are navigation state: they are filled with defaults on
/// serialization when unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub title: Option<FilterValue>,
    pub make: Option<FilterValue>,
    pub model: Option<FilterValue>,
    pub year_min: Option<FilterValue>,
    pub year_max: Option<FilterValue>,
    pub price_min: Option<FilterValue>,
    pub price_max: Option<FilterValue>,
    pub state: Option<FilterValue>,
    pub auction_house: Option<FilterValue>,
    pub body_style: Option<FilterValue>,
    pub transmission: Option<FilterValue>,
    pub newly_added: Option<FilterValue>,
    pub no_reserve: bool,
    pub sort: Option<FilterValue>,
    pub page: Option<PageNumber>,
    pub limit: Option<PageLimit>,
}

fn text(value: Option<&str>) -> Option<FilterValue> {
    value.and_then(|v| FilterValue::new(v).ok())
}

impl FilterCriteria {
    /// Reads criteria from URL parameters. Missing or malformed values fall
    /// back to their defaults; this never fails.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            title: text(params.get("title")),
            make: text(params.get("make")),
            model: text(params.get("model")),
            year_min: text(params.get("year_min")),
            year_max: text(params.get("year_max")),
            price_min: text(params.get("price_min")),
            price_max: text(params.get("price_max")),
            state: text(params.get("state")),
            auction_house: text(params.get("auction_house")),
            body_style: text(params.get("body_style")),
            transmission: text(params.get("transmission")),
            newly_added: text(params.get("newly_added")),
            no_reserve: params.get("no_reserve") == Some("true"),
            sort: text(params.get("sort")),
            page: params.get("page").and_then(|v| v.parse().ok()),
            limit: params.get("limit").and_then(|v| v.parse().ok()),
        }
    }

    /// Filter fields in canonical order.
    fn text_fields(&self) -> [(&'static str, Option<&FilterValue>); 12] {
        [
            ("title", self.title.as_ref()),
            ("make", self.make.as_ref()),
            ("model", self.model.as_ref()),
            ("year_min", self.year_min.as_ref()),
            ("year_max", self.year_max.as_ref()),
            ("price_min", self.price_min.as_ref()),
            ("price_max", self.price_max.as_ref()),
            ("state", self.state.as_ref()),
            ("auction_house", self.auction_house.as_ref()),
            ("body_style", self.body_style.as_ref()),
            ("transmission", self.transmission.as_ref()),
            ("newly_added", self.newly_added.as_ref()),
        ]
    }

    /// Canonical query string: non-empty filters in fixed order, then
    /// `no_reserve=true` when set, then `sort`, `page` and `limit` with their
    /// defaults injected.
    pub fn to_query_string(&self) -> QueryString {
        let mut pairs: Vec<(&str, String)> = self
            .text_fields()
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .collect();

        if self.no_reserve {
            pairs.push(("no_reserve", "true".to_string()));
        }

        pairs.push((
            "sort",
            self.sort
                .as_ref()
                .map_or_else(|| DEFAULT_SORT.to_string(), |s| s.to_string()),
        ));
        pairs.push((
            "page",
            self.page.map_or(DEFAULT_PAGE, PageNumber::get).to_string(),
        ));
        pairs.push((
            "limit",
            self.limit.map_or(DEFAULT_LIMIT, PageLimit::get).to_string(),
        ));

        QueryString::from_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
    }

    /// Whether any filter (not navigation) field is set.
    pub fn has_filters(&self) -> bool {
        self.no_reserve || self.text_fields().iter().any(|(_, value)| value.is_some())
    }

    pub fn with_page(mut self, page: PageNumber) -> Self {
        self.page = Some(page);
        self
    }

    /// Drops the page so the next serialization starts from the first page.
    pub fn first_page(mut self) -> Self {
        self.page = None;
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page.map_or(DEFAULT_PAGE, PageNumber::get)
    }

    pub fn limit(&self) -> u32 {
        self.limit.map_or(DEFAULT_LIMIT, PageLimit::get)
    }
}

/// Returned when a quick filter name is not one of the known presets.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown quick filter: {0}")]
pub struct UnknownQuickFilter(pub String);

/// Named preset that sets one or more criteria fields in one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QuickFilter {
    NoReserve,
    HoldenMuscleCars,
    FordGtFalcons,
    Pre1970,
    Under100k,
}

impl QuickFilter {
    /// Presets in the order the search form shows them.
    pub const ALL: [QuickFilter; 5] = [
        QuickFilter::NoReserve,
        QuickFilter::HoldenMuscleCars,
        QuickFilter::FordGtFalcons,
        QuickFilter::Pre1970,
        QuickFilter::Under100k,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickFilter::NoReserve => "No Reserve",
            QuickFilter::HoldenMuscleCars => "Holden Muscle Cars",
            QuickFilter::FordGtFalcons => "Ford GT Falcons",
            QuickFilter::Pre1970 => "Pre-1970",
            QuickFilter::Under100k => "Under $100k",
        }
    }

    /// Merges the preset over `criteria`. Preset fields always win.
    pub fn apply(self, mut criteria: FilterCriteria) -> FilterCriteria {
        let set = |value: &str| FilterValue::new(value).ok();
        match self {
            QuickFilter::NoReserve => criteria.no_reserve = true,
            QuickFilter::HoldenMuscleCars => criteria.make = set("Holden"),
            QuickFilter::FordGtFalcons => {
                criteria.make = set("Ford");
                criteria.model = set("Falcon GT");
            }
            QuickFilter::Pre1970 => criteria.year_max = set("1969"),
            QuickFilter::Under100k => criteria.price_max = set("100000"),
        }
        criteria
    }
}

impl FromStr for QuickFilter {
    type Err = UnknownQuickFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        QuickFilter::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownQuickFilter(name.to_string()))
    }
}

/// Search request issued by the home page grid.
///
/// Copies [`FEATURED_KEYS`] verbatim from the page URL. When none are present,
/// falls back to recently added lots in auction-date order. Always asks for
/// [`FEATURED_LIMIT`] lots.
pub fn featured_query(params: &QueryParams) -> QueryString {
    let mut pairs: Vec<(&str, &str)> = FEATURED_KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (*key, value)))
        .collect();

    if pairs.is_empty() {
        pairs.push(("newly_added", FEATURED_NEWLY_ADDED));
        pairs.push(("sort", DEFAULT_SORT));
    }

    let limit = FEATURED_LIMIT.to_string();
    pairs.push(("limit", limit.as_str()));

    QueryString::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Option<FilterValue> {
        FilterValue::new(s).ok()
    }

    #[test]
    fn empty_criteria_serialize_to_defaults_only() {
        let query = FilterCriteria::default().to_query_string();
        assert_eq!(query.as_str(), "sort=auction_date+desc&page=1&limit=20");
        assert_eq!(query.params().get("sort"), Some("auction_date desc"));
    }

    #[test]
    fn whitespace_only_values_are_absent() {
        let params = QueryParams::from_pairs([("make", "   "), ("model", " Torana ")]);
        let criteria = FilterCriteria::from_params(&params);
        assert_eq!(criteria.make, None);
        assert_eq!(criteria.model, value("Torana"));
        assert_eq!(
            criteria.to_query_string().as_str(),
            "model=Torana&sort=auction_date+desc&page=1&limit=20"
        );
    }

    #[test]
    fn serialization_follows_canonical_order() {
        let criteria = FilterCriteria {
            transmission: value("Manual"),
            title: value("GTS"),
            year_max: value("1975"),
            no_reserve: true,
            make: value("Holden"),
            ..Default::default()
        };
        assert_eq!(
            criteria.to_query_string().as_str(),
            "title=GTS&make=Holden&year_max=1975&transmission=Manual&no_reserve=true\
             &sort=auction_date+desc&page=1&limit=20"
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let criteria = FilterCriteria {
            title: value("Monaro & Co"),
            state: value("NSW"),
            price_min: value("10000"),
            newly_added: value("7d"),
            sort: value("price asc"),
            page: "4".parse().ok(),
            ..Default::default()
        };
        let once = criteria.to_query_string();
        let twice = FilterCriteria::from_params(&once.params()).to_query_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_navigation_values_fall_back() {
        let params = QueryParams::parse("page=zero&limit=-5&no_reserve=yes");
        let criteria = FilterCriteria::from_params(&params);
        assert_eq!(criteria.page, None);
        assert_eq!(criteria.limit, None);
        assert!(!criteria.no_reserve);
        assert_eq!(criteria.current_page(), 1);
        assert_eq!(criteria.limit(), 20);
    }

    #[test]
    fn false_no_reserve_is_omitted() {
        let params = QueryParams::parse("no_reserve=false&make=Ford");
        let query = FilterCriteria::from_params(&params).to_query_string();
        assert!(!query.as_str().contains("no_reserve"));
    }

    #[test]
    fn pre_1970_overrides_existing_year_max() {
        let criteria = FilterCriteria {
            year_max: value("1985"),
            ..Default::default()
        };
        let updated = QuickFilter::Pre1970.apply(criteria);
        assert_eq!(updated.year_max, value("1969"));
    }

    #[test]
    fn no_reserve_preset_sets_flag_and_keeps_other_fields() {
        let criteria = FilterCriteria {
            make: value("Holden"),
            ..Default::default()
        };
        let updated = QuickFilter::NoReserve.apply(criteria);
        assert!(updated.no_reserve);
        assert_eq!(updated.make, value("Holden"));
        assert!(updated.to_query_string().as_str().contains("no_reserve=true"));
    }

    #[test]
    fn quick_filter_parses_labels() {
        assert_eq!("Under $100k".parse(), Ok(QuickFilter::Under100k));
        assert_eq!(" pre-1970 ".parse(), Ok(QuickFilter::Pre1970));
        assert_eq!(
            "Cheap".parse::<QuickFilter>(),
            Err(UnknownQuickFilter("Cheap".to_string()))
        );
    }

    #[test]
    fn featured_query_defaults_without_filters() {
        let query = featured_query(&QueryParams::parse("title=ignored&page=3"));
        assert_eq!(
            query.as_str(),
            "newly_added=14d&sort=auction_date+desc&limit=100"
        );
    }

    #[test]
    fn featured_query_copies_known_keys() {
        let query = featured_query(&QueryParams::parse("state=VIC&make=Ford&page=2"));
        assert_eq!(query.as_str(), "make=Ford&state=VIC&limit=100");
    }
}
