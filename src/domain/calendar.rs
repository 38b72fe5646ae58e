//! Auction calendar query and events.

use serde::{Deserialize, Serialize};

use crate::domain::lenient::{lenient_bool, lenient_count, lenient_text};
use crate::domain::lot::auction_house_name;
use crate::domain::query::{Location, QueryParams, QueryString};
use crate::domain::types::{CalendarMonth, FilterValue};

/// State chips shown above the calendar. An empty value means every state.
pub const STATE_FILTERS: [(&str, &str); 6] = [
    ("All States", ""),
    ("NSW", "NSW"),
    ("VIC", "VIC"),
    ("QLD", "QLD"),
    ("SA", "SA"),
    ("WA", "WA"),
];

/// Parameters of a calendar request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalendarQuery {
    pub state: Option<FilterValue>,
    pub month: Option<CalendarMonth>,
    pub auction_house: Option<FilterValue>,
    pub online_only: bool,
}

impl CalendarQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            state: params.get("state").and_then(|v| FilterValue::new(v).ok()),
            month: params.get("month").and_then(|v| v.parse().ok()),
            auction_house: params
                .get("auction_house")
                .and_then(|v| FilterValue::new(v).ok()),
            online_only: params.get("online_only") == Some("true"),
        }
    }

    pub fn to_query_string(&self) -> QueryString {
        let month = self.month.map(|m| m.to_string());
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(4);
        if let Some(state) = &self.state {
            pairs.push(("state", state.as_str()));
        }
        if let Some(month) = &month {
            pairs.push(("month", month.as_str()));
        }
        if let Some(house) = &self.auction_house {
            pairs.push(("auction_house", house.as_str()));
        }
        if self.online_only {
            pairs.push(("online_only", "true"));
        }
        QueryString::from_pairs(pairs)
    }
}

/// A state filter chip with the link it navigates to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StateChip {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Builds the state chips for `path`. Every chip keeps the other parameters of
/// the current URL; "All States" drops `state` entirely.
pub fn state_chips(path: &str, params: &QueryParams) -> Vec<StateChip> {
    let current = params.get("state").unwrap_or("");
    STATE_FILTERS
        .iter()
        .map(|(label, value)| {
            let next = if value.is_empty() {
                params.without("state")
            } else {
                params.with("state", *value)
            };
            StateChip {
                label: *label,
                href: Location::new(path)
                    .with_query(next.to_query_string())
                    .href(),
                active: current == *value,
            }
        })
        .collect()
}

/// A scheduled auction as reported by the calendar endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AuctionEvent {
    #[serde(default, rename = "_id", deserialize_with = "lenient_text")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, alias = "name", deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, alias = "house", deserialize_with = "lenient_text")]
    pub auction_house: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
    #[serde(
        default,
        alias = "start",
        alias = "start_date",
        alias = "auction_date",
        deserialize_with = "lenient_text"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        alias = "end",
        alias = "auction_end",
        deserialize_with = "lenient_text"
    )]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub online_only: Option<bool>,
    #[serde(default, alias = "lot_count", deserialize_with = "lenient_count")]
    pub lots: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

impl AuctionEvent {
    /// Record id, preferring `_id` over `id`.
    pub fn event_id(&self) -> Option<&str> {
        [&self.object_id, &self.id]
            .into_iter()
            .filter_map(|id| id.as_deref().map(str::trim))
            .find(|id| !id.is_empty())
    }

    pub fn house_name(&self) -> String {
        auction_house_name(self.auction_house.as_deref().or(self.source.as_deref()))
    }

    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| format!("{} Auction", self.house_name()), str::to_string)
    }
}
