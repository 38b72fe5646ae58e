//! Typed access to the remote auction aggregation API.
//!
//! Pages and the synchronizer depend on the reader traits only, so tests can
//! substitute mocks for the HTTP client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::errors::ApiResult;
use crate::domain::calendar::AuctionEvent;
use crate::domain::lot::Lot;
use crate::domain::pagination::PaginationPayload;
use crate::domain::query::QueryString;
use crate::domain::types::LotId;

#[cfg(feature = "server")]
pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Body of a search response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(from = "SearchBody")]
pub struct SearchPayload {
    pub results: Vec<Lot>,
    pub pagination: Option<PaginationPayload>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Bare(Vec<Lot>),
    Envelope {
        #[serde(default)]
        results: Vec<Lot>,
        #[serde(default)]
        pagination: Option<PaginationPayload>,
    },
}

impl From<SearchBody> for SearchPayload {
    fn from(body: SearchBody) -> Self {
        match body {
            SearchBody::Bare(results) => Self {
                results,
                pagination: None,
            },
            SearchBody::Envelope {
                results,
                pagination,
            } => Self {
                results,
                pagination,
            },
        }
    }
}

/// Body of a calendar response: either a bare list or an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum CalendarBody {
    Bare(Vec<AuctionEvent>),
    Envelope {
        #[serde(default, alias = "results")]
        events: Vec<AuctionEvent>,
    },
}

impl From<CalendarBody> for Vec<AuctionEvent> {
    fn from(body: CalendarBody) -> Self {
        match body {
            CalendarBody::Bare(events) | CalendarBody::Envelope { events } => events,
        }
    }
}

#[async_trait]
pub trait SearchReader: Send + Sync {
    /// Runs `GET /api/search?{query}`.
    async fn search(&self, query: &QueryString) -> ApiResult<SearchPayload>;
}

#[async_trait]
pub trait LotReader: Send + Sync {
    /// Runs `GET /api/lot/{id}`.
    async fn get_lot(&self, id: &LotId) -> ApiResult<Lot>;
}

#[async_trait]
pub trait CalendarReader: Send + Sync {
    /// Runs `GET /api/calendar?{query}`.
    async fn list_events(&self, query: &QueryString) -> ApiResult<Vec<AuctionEvent>>;
}
