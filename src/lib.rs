//! Server-rendered front end for a classic-car auction aggregator.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::client::HttpAggregatorClient;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::browse::{filter_browse, quick_filter_browse, reset_browse, show_browse};
#[cfg(feature = "server")]
use crate::routes::calendar::show_calendar;
#[cfg(feature = "server")]
use crate::routes::lot::{show_auction_detail, show_lot};
#[cfg(feature = "server")]
use crate::routes::main::{search_home, show_about, show_index};

pub mod api;
pub mod domain;
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;
pub mod sync;

/// Registers every page handler. Shared by [`run`] and the integration tests.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(search_home)
        .service(show_about)
        .service(show_browse)
        .service(filter_browse)
        .service(reset_browse)
        .service(quick_filter_browse)
        .service(show_auction_detail)
        .service(show_lot)
        .service(show_calendar);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let api = HttpAggregatorClient::new(&server_config.api_base_url, server_config.api_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    log::info!("Using aggregation API at {}", api.base_url());

    // Keys and stores for flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
