//! Keeps the filter criteria, the page URL and the result view in step.
//!
//! The URL query string is the single source of truth for the criteria. Every
//! mutation produces a [`Location`] to navigate to, and every navigation
//! reads the criteria back from the URL before fetching results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use serde::Serialize;

use crate::api::SearchReader;
use crate::api::errors::ApiResult;
use crate::domain::criteria::{FilterCriteria, QuickFilter, UnknownQuickFilter};
use crate::domain::lot::Lot;
use crate::domain::pagination::PaginationState;
use crate::domain::query::{Location, QueryParams, QueryString};

/// One page of search results with resolved pagination.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResults {
    pub lots: Vec<Lot>,
    pub pagination: PaginationState,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

/// What the results area currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(SearchResults),
    Failed(String),
}

/// Binds criteria to the query string of one page path.
#[derive(Debug)]
pub struct QueryStateSynchronizer {
    path: String,
    generation: AtomicU64,
    state: Mutex<ViewState>,
}

impl QueryStateSynchronizer {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            generation: AtomicU64::new(0),
            state: Mutex::new(ViewState::Idle),
        }
    }

    pub fn read_from_url(&self, params: &QueryParams) -> FilterCriteria {
        FilterCriteria::from_params(params)
    }

    pub fn serialize(&self, criteria: &FilterCriteria) -> QueryString {
        criteria.to_query_string()
    }

    /// Navigation target for submitting `criteria`. Starts over from the
    /// first page and keeps the sort order and page size.
    pub fn apply_filters(&self, criteria: &FilterCriteria) -> Location {
        let query = criteria.clone().first_page().to_query_string();
        Location::new(self.path.as_str()).with_query(query)
    }

    /// Navigation target that clears every filter.
    pub fn reset_filters(&self) -> Location {
        Location::new(self.path.as_str())
    }

    /// Merges the preset called `name` over `criteria` and returns the
    /// navigation target.
    pub fn quick_filter(
        &self,
        name: &str,
        criteria: FilterCriteria,
    ) -> Result<Location, UnknownQuickFilter> {
        let preset: QuickFilter = name.parse()?;
        Ok(self.apply_filters(&preset.apply(criteria)))
    }

    /// Fetches one page of results for `criteria`.
    ///
    /// The view switches to [`ViewState::Loading`] right away, dropping any
    /// earlier results. The outcome is committed to the view only if no
    /// newer fetch started in the meantime; the caller gets it either way.
    pub async fn fetch_results<R>(
        &self,
        reader: &R,
        criteria: &FilterCriteria,
    ) -> ApiResult<SearchResults>
    where
        R: SearchReader + ?Sized,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.commit(generation, ViewState::Loading);

        let query = criteria.to_query_string();
        let result = reader.search(&query).await.map(|payload| {
            let pagination = PaginationState::resolve(
                payload.pagination.as_ref(),
                u64::from(criteria.current_page()),
                u64::from(criteria.limit()),
                payload.results.len(),
            );
            SearchResults {
                lots: payload.results,
                pagination,
            }
        });

        let next = match &result {
            Ok(results) => ViewState::Loaded(results.clone()),
            Err(err) => ViewState::Failed(err.to_string()),
        };
        if !self.commit(generation, next) {
            debug!("Discarding stale results for generation {generation} ({query})");
        }

        result
    }

    pub fn view_state(&self) -> ViewState {
        self.lock_state().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores `state` if `generation` is still the latest. Returns whether it
    /// was stored.
    fn commit(&self, generation: u64, state: ViewState) -> bool {
        let mut guard = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *guard = state;
        true
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
