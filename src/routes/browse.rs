use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::client::HttpAggregatorClient;
use crate::forms::search::{FilterForm, QuickFilterForm};
use crate::routes::{base_context, query_params, redirect, render_template};
use crate::services::ServiceError;
use crate::services::search::{self as search_service, BROWSE_PATH};

#[get("/browse")]
pub async fn show_browse(
    req: HttpRequest,
    api: web::Data<HttpAggregatorClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = query_params(&req);
    let data = search_service::load_browse_page(api.get_ref(), &params).await;

    let mut context = base_context(&flash_messages, "browse");
    context.insert("form", &data.form);
    context.insert("quick_filters", &data.quick_filters);
    context.insert("has_filters", &data.has_filters);
    context.insert("results", &data.results);

    render_template(&tera, "browse/index.html", &context)
}

#[post("/browse/filter")]
pub async fn filter_browse(body: web::Bytes) -> impl Responder {
    match FilterForm::from_body(&body) {
        Ok(form) => redirect(&search_service::apply_filters(form).href()),
        Err(err) => {
            log::error!("Failed to parse filter form: {err}");
            FlashMessage::error("Could not read the search form.").send();
            redirect(BROWSE_PATH)
        }
    }
}

#[post("/browse/reset")]
pub async fn reset_browse() -> impl Responder {
    redirect(&search_service::reset_filters().href())
}

#[post("/browse/quick")]
pub async fn quick_filter_browse(body: web::Bytes) -> impl Responder {
    let form = match QuickFilterForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse quick filter form: {err}");
            FlashMessage::error("Could not read the quick filter.").send();
            return redirect(BROWSE_PATH);
        }
    };

    match search_service::quick_filter(form) {
        Ok(location) => redirect(&location.href()),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(BROWSE_PATH)
        }
        Err(err) => {
            log::error!("Failed to apply quick filter: {err}");
            redirect(BROWSE_PATH)
        }
    }
}
