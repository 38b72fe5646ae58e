//! Home and browse page loaders and the search form actions.

use crate::api::SearchReader;
use crate::domain::criteria::{FilterCriteria, featured_query};
use crate::domain::query::{Location, QueryParams};
use crate::domain::types::PageNumber;
use crate::dto::search::{
    BrowsePageData, FilterFormValues, HomePageData, HomeSearchValues, LotCard, ResultsState,
};
use crate::forms::FormError;
use crate::forms::search::{FilterForm, HomeSearchForm, QuickFilterForm};
use crate::pagination::Paginated;
use crate::services::ServiceResult;
use crate::sync::{QueryStateSynchronizer, ViewState};

pub const HOME_PATH: &str = "/";
pub const BROWSE_PATH: &str = "/browse";
pub const HOME_SEARCH_PATH: &str = "/search";

fn browse_sync() -> QueryStateSynchronizer {
    QueryStateSynchronizer::new(BROWSE_PATH)
}

/// Loads the featured grid for the home page.
///
/// Only lots that can be named are shown. A failed fetch renders the error
/// state with a link back to the same URL.
pub async fn load_home_page<R>(reader: &R, params: &QueryParams) -> HomePageData
where
    R: SearchReader + ?Sized,
{
    let query = featured_query(params);
    let retry_href = Location::new(HOME_PATH)
        .with_query(params.to_query_string())
        .href();

    let featured = match reader.search(&query).await {
        Ok(payload) => {
            let lots = payload
                .results
                .iter()
                .filter(|lot| lot.is_listable())
                .map(LotCard::from)
                .collect::<Vec<_>>();
            if lots.is_empty() {
                ResultsState::no_matches()
            } else {
                let total = lots.len() as u64;
                ResultsState::Results {
                    lots: Paginated::single(lots),
                    total,
                }
            }
        }
        Err(err) => {
            log::error!("Failed to load featured lots: {err}");
            ResultsState::failed(retry_href)
        }
    };

    let text = |key: &str| params.get(key).unwrap_or_default().to_string();
    let search = HomeSearchValues {
        make: text("make"),
        model: text("model"),
        variant: text("variant"),
        action: Location::new(HOME_SEARCH_PATH)
            .with_query(params.to_query_string())
            .href(),
    };

    HomePageData { search, featured }
}

/// Loads the browse page for the criteria encoded in `params`.
///
/// Fetch failures never fail the page; they render the error state.
pub async fn load_browse_page<R>(reader: &R, params: &QueryParams) -> BrowsePageData
where
    R: SearchReader + ?Sized,
{
    let sync = browse_sync();
    let criteria = sync.read_from_url(params);
    let retry_href = Location::new(BROWSE_PATH)
        .with_query(params.to_query_string())
        .href();

    if let Err(err) = sync.fetch_results(reader, &criteria).await {
        log::error!("Failed to load lots: {err}");
    }

    let results = match sync.view_state() {
        ViewState::Loaded(results) if results.is_empty() => ResultsState::no_matches(),
        ViewState::Loaded(results) => {
            let cards: Vec<LotCard> = results.lots.iter().map(LotCard::from).collect();
            let page_href = |page: usize| {
                let page = u32::try_from(page)
                    .ok()
                    .and_then(|p| PageNumber::new(p).ok())
                    .unwrap_or(PageNumber::FIRST);
                Location::new(BROWSE_PATH)
                    .with_query(criteria.clone().with_page(page).to_query_string())
                    .href()
            };
            let current = usize::try_from(results.pagination.page).unwrap_or(1);
            let total_pages = usize::try_from(results.pagination.total_pages).unwrap_or(0);
            ResultsState::Results {
                lots: Paginated::new(cards, current, total_pages, page_href),
                total: results.pagination.total,
            }
        }
        ViewState::Idle | ViewState::Loading | ViewState::Failed(_) => {
            ResultsState::failed(retry_href)
        }
    };

    BrowsePageData {
        form: FilterFormValues::from(&criteria),
        quick_filters: BrowsePageData::quick_filter_labels(),
        has_filters: criteria.has_filters(),
        results,
    }
}

/// Navigation target after the search form is submitted.
pub fn apply_filters(form: FilterForm) -> Location {
    browse_sync().apply_filters(&FilterCriteria::from(form))
}

/// Navigation target after the home page search box is submitted.
///
/// Filled fields replace their parameter, blank ones remove it, every other
/// parameter is kept and the page goes back to 1.
pub fn home_search(params: &QueryParams, form: &HomeSearchForm) -> Location {
    let params = form
        .fields()
        .into_iter()
        .fold(params.clone(), |params, (key, value)| {
            if value.is_empty() {
                params.without(key)
            } else {
                params.with(key, value)
            }
        })
        .with("page", "1");
    Location::new(HOME_PATH).with_query(params.to_query_string())
}

/// Navigation target after the filters are cleared.
pub fn reset_filters() -> Location {
    browse_sync().reset_filters()
}

/// Navigation target after a quick-filter button is pressed.
pub fn quick_filter(form: QuickFilterForm) -> ServiceResult<Location> {
    let criteria = FilterCriteria::from(form.filters);
    let location = browse_sync()
        .quick_filter(&form.name, criteria)
        .map_err(|err| {
            log::warn!("Rejected quick filter: {err}");
            FormError::from(err)
        })?;
    Ok(location)
}
