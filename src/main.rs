use actix_web::middleware::Logger;
use actix_web::{middleware, web, App, HttpServer};
use dotenvy::dotenv;
use log::info;

mod api;
mod config;
mod constants;
mod domain;
mod logging;
mod models;
mod openapi;
mod services;
mod utils;

use config::ServerConfig;
use models::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    logging::setup_logging();

    let config = ServerConfig::from_env();
    let app_state = web::Data::new(AppState {
        config: config.clone(),
    });

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(api::routes::json_config())
            .configure(api::routes::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(5);

    info!("Server running at http://{}:{}", config.host, config.port);
    server.run().await
}
