use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::client::HttpAggregatorClient;
use crate::routes::{base_context, query_params, render_template};
use crate::services::calendar as calendar_service;

#[get("/auction-calendar")]
pub async fn show_calendar(
    req: HttpRequest,
    api: web::Data<HttpAggregatorClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = query_params(&req);
    let data = calendar_service::load_calendar_page(api.get_ref(), &params).await;

    let mut context = base_context(&flash_messages, "calendar");
    context.insert("chips", &data.chips);
    context.insert("form", &data.form);
    context.insert("events", &data.events);

    render_template(&tera, "calendar/index.html", &context)
}
