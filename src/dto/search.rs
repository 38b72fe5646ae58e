//! Page data for the home and browse pages.

use serde::Serialize;

use crate::domain::criteria::{FilterCriteria, QuickFilter};
use crate::domain::lot::{Lot, LotPrice};
use crate::domain::types::FilterValue;
use crate::pagination::Paginated;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load lots";
pub const NO_MATCHES_MESSAGE: &str = "No matching vehicles found";

fn text(value: &Option<FilterValue>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Filter form values as shown in the search panel and its hidden fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterFormValues {
    pub title: String,
    pub make: String,
    pub model: String,
    pub year_min: String,
    pub year_max: String,
    pub price_min: String,
    pub price_max: String,
    pub state: String,
    pub auction_house: String,
    pub body_style: String,
    pub transmission: String,
    pub newly_added: String,
    pub no_reserve: bool,
    pub sort: String,
    pub limit: String,
}

impl From<&FilterCriteria> for FilterFormValues {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            title: text(&criteria.title),
            make: text(&criteria.make),
            model: text(&criteria.model),
            year_min: text(&criteria.year_min),
            year_max: text(&criteria.year_max),
            price_min: text(&criteria.price_min),
            price_max: text(&criteria.price_max),
            state: text(&criteria.state),
            auction_house: text(&criteria.auction_house),
            body_style: text(&criteria.body_style),
            transmission: text(&criteria.transmission),
            newly_added: text(&criteria.newly_added),
            no_reserve: criteria.no_reserve,
            sort: text(&criteria.sort),
            limit: criteria.limit.map(|l| l.to_string()).unwrap_or_default(),
        }
    }
}

/// A lot as shown in a results grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LotCard {
    pub id: Option<String>,
    pub href: Option<String>,
    pub title: String,
    pub image: String,
    pub auction_house: String,
    pub location: String,
    pub badge: Option<&'static str>,
    pub date: Option<String>,
    pub odometer: Option<String>,
    pub transmission: Option<String>,
    pub price: LotPrice,
}

impl From<&Lot> for LotCard {
    fn from(lot: &Lot) -> Self {
        Self {
            id: lot.lot_id().map(str::to_string),
            href: lot.detail_href(),
            title: lot.display_title(),
            image: lot.primary_image(),
            auction_house: lot.auction_house(),
            location: lot.location_label(),
            badge: lot.badge().map(|b| b.label()),
            date: lot.scheduled_date().map(str::to_string),
            odometer: lot.odometer_reading().map(str::to_string),
            transmission: lot.transmission.clone(),
            price: lot.price(),
        }
    }
}

/// The three states of a results area.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsState {
    Results {
        lots: Paginated<LotCard>,
        total: u64,
    },
    NoMatches {
        message: &'static str,
    },
    Failed {
        message: &'static str,
        retry_href: String,
    },
}

impl ResultsState {
    pub fn no_matches() -> Self {
        ResultsState::NoMatches {
            message: NO_MATCHES_MESSAGE,
        }
    }

    pub fn failed(retry_href: impl Into<String>) -> Self {
        ResultsState::Failed {
            message: LOAD_FAILED_MESSAGE,
            retry_href: retry_href.into(),
        }
    }
}

/// Values echoed into the home page search box.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HomeSearchValues {
    pub make: String,
    pub model: String,
    pub variant: String,
    /// Form target carrying the current query so other parameters survive.
    pub action: String,
}

/// Data required to render the home page.
#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub search: HomeSearchValues,
    pub featured: ResultsState,
}

/// Data required to render the browse page.
#[derive(Debug, Serialize)]
pub struct BrowsePageData {
    pub form: FilterFormValues,
    pub quick_filters: Vec<&'static str>,
    pub has_filters: bool,
    pub results: ResultsState,
}

impl BrowsePageData {
    pub fn quick_filter_labels() -> Vec<&'static str> {
        QuickFilter::ALL.iter().map(|f| f.label()).collect()
    }
}
