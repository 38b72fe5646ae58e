use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::client::HttpAggregatorClient;
use crate::forms::search::HomeSearchForm;
use crate::routes::{base_context, query_params, redirect, render_template};
use crate::services::search::{self as search_service, HOME_PATH};

#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    api: web::Data<HttpAggregatorClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = query_params(&req);
    let data = search_service::load_home_page(api.get_ref(), &params).await;

    let mut context = base_context(&flash_messages, "index");
    context.insert("search", &data.search);
    context.insert("results", &data.featured);

    render_template(&tera, "main/index.html", &context)
}

#[post("/search")]
pub async fn search_home(req: HttpRequest, body: web::Bytes) -> impl Responder {
    let params = query_params(&req);
    match HomeSearchForm::from_body(&body) {
        Ok(form) => redirect(&search_service::home_search(&params, &form).href()),
        Err(err) => {
            log::error!("Failed to parse home search form: {err}");
            FlashMessage::error("Could not read the search form.").send();
            redirect(HOME_PATH)
        }
    }
}

#[get("/about")]
pub async fn show_about(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "about");
    render_template(&tera, "main/about.html", &context)
}
