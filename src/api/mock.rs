//! Mock API readers for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{CalendarReader, LotReader, SearchPayload, SearchReader};
use crate::domain::calendar::AuctionEvent;
use crate::domain::lot::Lot;
use crate::domain::query::QueryString;
use crate::domain::types::LotId;

mock! {
    pub Aggregator {}

    #[async_trait]
    impl SearchReader for Aggregator {
        async fn search(&self, query: &QueryString) -> ApiResult<SearchPayload>;
    }

    #[async_trait]
    impl LotReader for Aggregator {
        async fn get_lot(&self, id: &LotId) -> ApiResult<Lot>;
    }

    #[async_trait]
    impl CalendarReader for Aggregator {
        async fn list_events(&self, query: &QueryString) -> ApiResult<Vec<AuctionEvent>>;
    }
}
