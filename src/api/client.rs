//! `reqwest` implementation of the aggregation API readers.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{CalendarBody, CalendarReader, LotReader, SearchPayload, SearchReader};
use crate::domain::calendar::AuctionEvent;
use crate::domain::lot::Lot;
use crate::domain::query::QueryString;
use crate::domain::types::LotId;

pub const DEFAULT_API_BASE_URL: &str = "https://aggregator.omnisuiteai.com";

/// HTTP client for the aggregation API. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct HttpAggregatorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAggregatorClient {
    /// Builds a client for `base_url`. Without a timeout, requests wait as
    /// long as the server keeps the connection open.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{base_url} cannot be a base url")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path and sets the query, if any.
    fn endpoint(&self, segments: &[&str], query: Option<&QueryString>) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query.filter(|q| !q.is_empty()).map(QueryString::as_str));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!("GET {url}");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SearchReader for HttpAggregatorClient {
    async fn search(&self, query: &QueryString) -> ApiResult<SearchPayload> {
        let url = self.endpoint(&["api", "search"], Some(query))?;
        self.get_json(url).await
    }
}

#[async_trait]
impl LotReader for HttpAggregatorClient {
    async fn get_lot(&self, id: &LotId) -> ApiResult<Lot> {
        let url = self.endpoint(&["api", "lot", id.as_str()], None)?;
        self.get_json(url).await
    }
}

#[async_trait]
impl CalendarReader for HttpAggregatorClient {
    async fn list_events(&self, query: &QueryString) -> ApiResult<Vec<AuctionEvent>> {
        let url = self.endpoint(&["api", "calendar"], Some(query))?;
        let body: CalendarBody = self.get_json(url).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::QueryParams;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpAggregatorClient {
        HttpAggregatorClient::new(&server.uri(), Some(Duration::from_secs(5)))
            .expect("client should build")
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpAggregatorClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let client = HttpAggregatorClient::new("https://example.com/proxy/", None).unwrap();
        let url = client.endpoint(&["api", "lot", "a/b c"], None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/proxy/api/lot/a%2Fb%20c");
    }

    #[tokio::test]
    async fn search_sends_query_and_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("make", "Holden"))
            .and(query_param("sort", "auction_date desc"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"_id": "1", "make": "Holden", "model": "Monaro"}],
                "pagination": {"page": 1, "total": 1, "totalPages": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = QueryParams::parse("make=Holden&sort=auction_date+desc").to_query_string();
        let payload = client(&server).search(&query).await.unwrap();

        assert_eq!(payload.results.len(), 1);
        assert_eq!(payload.results[0].display_title(), "Holden Monaro");
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .search(&QueryString::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn missing_lot_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lot/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let id = LotId::new("gone").unwrap();
        let err = client(&server).get_lot(&id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn garbage_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .list_events(&QueryString::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn calendar_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar"))
            .and(query_param("state", "NSW"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{"title": "Shannons Sydney", "state": "NSW"}]
            })))
            .mount(&server)
            .await;

        let query = QueryParams::parse("state=NSW").to_query_string();
        let events = client(&server).list_events(&query).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title.as_deref(), Some("Shannons Sydney"));
    }
}
