use std::time::Duration;

use actix_web::cookie::Key;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::json;
use tera::Tera;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use classic_auctions::api::client::HttpAggregatorClient;
use classic_auctions::configure_routes;
use classic_auctions::routes::alert_level_to_str;

fn tera() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).expect("templates parse")
}

fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::generate()).build();
    FlashMessagesFramework::builder(store).build()
}

fn api_client(server: &MockServer) -> HttpAggregatorClient {
    HttpAggregatorClient::new(&server.uri(), Some(Duration::from_secs(5))).expect("client builds")
}

macro_rules! init_app {
    ($server:expr) => {
        actix_test::init_service(
            App::new()
                .wrap(flash_framework())
                .app_data(web::Data::new(tera()))
                .app_data(web::Data::new(api_client($server)))
                .configure(configure_routes),
        )
        .await
    };
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = actix_test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn browse_renders_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("make", "Holden"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "m1", "year": 1971, "make": "Holden", "model": "Monaro GTS"}],
            "pagination": {"page": 1, "total": 1, "totalPages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/browse?make=Holden").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Showing 1 classic cars"));
    assert!(body.contains("1971 Holden Monaro GTS"));
}

#[actix_web::test]
async fn browse_renders_no_match_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [], "pagination": {"total": 0}})),
        )
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/browse").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("No matching vehicles found"));
    assert!(!body.contains("Failed to load lots"));
}

#[actix_web::test]
async fn browse_renders_error_state_with_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/browse?make=Ford").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Failed to load lots"));
    assert!(body.contains("Try Again"));
    assert!(body.contains("browse?make=Ford"));
    assert!(!body.contains("Showing"));
}

#[actix_web::test]
async fn home_renders_featured_lots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("newly_added", "14d"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "f1", "title": "1965 Ford Mustang Fastback"},
            {"_id": "f2"}
        ])))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("1965 Ford Mustang Fastback"));
    assert!(body.contains("Showing 1 classic cars"));
}

#[actix_web::test]
async fn detail_without_id_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/auction-detail").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("No lot ID provided"));
}

#[actix_web::test]
async fn detail_renders_lot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lot/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc123",
            "title": "1970 Ford Falcon GTHO",
            "source": "shannons",
            "price_range": {"low": 500000, "high": 600000},
            "specs": {"engine": "351 Cleveland V8"}
        })))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get()
        .uri("/auction-detail?id=abc123")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("1970 Ford Falcon GTHO"));
    assert!(body.contains("Shannons"));
    assert!(body.contains("351 Cleveland V8"));
}

#[actix_web::test]
async fn lot_path_maps_api_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lot/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/lot/missing").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("Lot not found"));
}

#[actix_web::test]
async fn lot_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lot/x1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/lot/x1").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(
        body_text(resp)
            .await
            .contains("Failed to load vehicle details. Please try again later.")
    );
}

#[actix_web::test]
async fn home_search_redirects_and_reloads_featured_grid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("make", "Holden"))
        .and(query_param("state", "NSW"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "h1", "title": "1972 Holden HQ Monaro GTS"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::post()
        .uri("/search?state=NSW&page=3")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("make=+Holden&model=&variant=GTS")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert_eq!(target, "/?state=NSW&page=1&make=Holden&variant=GTS");

    let req = actix_test::TestRequest::get().uri(&target).to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("1972 Holden HQ Monaro GTS"));
    assert!(body.contains(r#"name="variant" placeholder="Variant" value="GTS""#));
}

#[actix_web::test]
async fn browse_keeps_lots_carrying_both_id_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"_id": "a1", "id": "a1", "title": "1969 Ford Falcon GT"},
                {"_id": "b2", "title": "1977 Holden Torana A9X"}
            ],
            "pagination": {"page": 1, "total": 2, "totalPages": 1}
        })))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/browse").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("1969 Ford Falcon GT"));
    assert!(body.contains("1977 Holden Torana A9X"));
    assert!(!body.contains("Failed to load lots"));
}

#[actix_web::test]
async fn browse_survives_huge_reported_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "p1", "title": "1970 Ford Falcon XY GT"}],
            "pagination": {"page": 1e30, "total": 5}
        })))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/browse").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("1970 Ford Falcon XY GT"));
}

#[actix_web::test]
async fn filter_post_redirects_to_canonical_query() {
    let server = MockServer::start().await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::post()
        .uri("/browse/filter")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("title=&make=+Holden&no_reserve=on&sort=&limit=")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/browse?make=Holden&no_reserve=true&sort=auction_date+desc&page=1&limit=20"
    );
}

#[actix_web::test]
async fn reset_post_redirects_to_bare_path() {
    let server = MockServer::start().await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::post().uri("/browse/reset").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/browse");
}

#[actix_web::test]
async fn quick_filter_overrides_year_max() {
    let server = MockServer::start().await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::post()
        .uri("/browse/quick")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("name=Pre-1970&make=Ford&year_max=1985&limit=50")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        "/browse?make=Ford&year_max=1969&sort=auction_date+desc&page=1&limit=50"
    );
}

#[actix_web::test]
async fn unknown_quick_filter_redirects_back() {
    let server = MockServer::start().await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::post()
        .uri("/browse/quick")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("name=Cheap+Utes")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/browse");
}

#[actix_web::test]
async fn calendar_renders_events_and_chips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calendar"))
        .and(query_param("state", "VIC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "Shannons December Classic Auction",
            "lots": 45,
            "location": "Melbourne, VIC"
        }])))
        .mount(&server)
        .await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get()
        .uri("/auction-calendar?state=VIC")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Shannons December Classic Auction"));
    assert!(body.contains("All States"));
    assert!(body.contains("chip active\">VIC"));
}

#[actix_web::test]
async fn about_page_renders() {
    let server = MockServer::start().await;
    let app = init_app!(&server);

    let req = actix_test::TestRequest::get().uri("/about").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("About"));
}
