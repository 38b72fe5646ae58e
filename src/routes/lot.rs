use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::client::HttpAggregatorClient;
use crate::dto::lot::{LOT_LOAD_FAILED_MESSAGE, LOT_NOT_FOUND_MESSAGE, NO_LOT_ID_MESSAGE};
use crate::routes::{base_context, query_params, render_template, render_template_with_status};
use crate::services::ServiceError;
use crate::services::lot as lot_service;

async fn render_lot(
    raw_id: Option<&str>,
    api: &HttpAggregatorClient,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> actix_web::HttpResponse {
    let mut context = base_context(flash_messages, "browse");

    match lot_service::load_lot_page(api, raw_id).await {
        Ok(data) => {
            context.insert("page", &data);
            render_template(tera, "lot/index.html", &context)
        }
        Err(err) => {
            let (status, message) = match err {
                ServiceError::TypeConstraint(_) => (StatusCode::BAD_REQUEST, NO_LOT_ID_MESSAGE),
                ServiceError::NotFound => (StatusCode::NOT_FOUND, LOT_NOT_FOUND_MESSAGE),
                ServiceError::Upstream(_) | ServiceError::Form(_) => {
                    (StatusCode::BAD_GATEWAY, LOT_LOAD_FAILED_MESSAGE)
                }
            };
            context.insert("error", message);
            render_template_with_status(tera, "lot/index.html", &context, status)
        }
    }
}

#[get("/auction-detail")]
pub async fn show_auction_detail(
    req: HttpRequest,
    api: web::Data<HttpAggregatorClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = query_params(&req);
    render_lot(params.get("id"), &api, &flash_messages, &tera).await
}

#[get("/lot/{lot_id}")]
pub async fn show_lot(
    lot_id: web::Path<String>,
    api: web::Data<HttpAggregatorClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_lot(Some(lot_id.as_str()), &api, &flash_messages, &tera).await
}
