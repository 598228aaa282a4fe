use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use rental_inquiries::clock::SystemClock;
use rental_inquiries::config::Config;
use rental_inquiries::handlers;
use rental_inquiries::store;
use rental_inquiries::submitter::InquirySubmitter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store = store::connect(&config.store).await.map_err(|e| {
        log::error!("Failed to open inquiry store: {e}");
        io::Error::other(e)
    })?;

    let submitter = web::Data::new(InquirySubmitter::new(
        store,
        Arc::new(SystemClock),
        config.collection.clone(),
    ));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(submitter.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
