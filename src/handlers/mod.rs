use actix_web::{web, HttpResponse, Responder};

use crate::error::ApiError;

pub mod inquiries;
pub mod pages;

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Body errors that get past the lenient field decoding still answer in JSON.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected inquiry body: {err}");
        ApiError::MalformedBody(err.to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health))
        .service(
            web::resource("/booking")
                .route(web::get().to(pages::booking_page))
                .route(web::post().to(pages::submit_booking_form)),
        )
        .service(
            web::scope("/api/inquiries")
                .route("", web::post().to(inquiries::create_inquiry)),
        );
}
