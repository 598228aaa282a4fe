use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use rental_inquiries::clock::{Clock, ManualClock};
use rental_inquiries::handlers;
use rental_inquiries::models::InquiryStatus;
use rental_inquiries::store::MemoryStore;
use rental_inquiries::submitter::InquirySubmitter;

struct Fixture {
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    submitter: web::Data<InquirySubmitter>,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new("2025-07-01T12:00:00Z".parse().unwrap()));
    let submitter = web::Data::new(InquirySubmitter::new(
        store.clone(),
        clock.clone(),
        "bookings",
    ));
    Fixture {
        store,
        clock,
        submitter,
    }
}

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+1 555 0100",
        "checkIn": "2025-08-01",
        "checkOut": "2025-08-05",
        "guests": 2,
        "message": ""
    })
}

const JANE_FORM: &str = "name=Jane+Doe&email=jane%40example.com&phone=%2B1+555+0100\
&checkIn=2025-08-01&checkOut=2025-08-05&guests=2&message=";

#[actix_web::test]
async fn json_inquiry_creates_one_pending_record() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(jane())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["inquiry"]["guests"], json!(2));
    assert!(body["id"].is_string());

    let records = fx.store.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.collection, "bookings");
    assert_eq!(record.inquiry.name, "Jane Doe");
    assert_eq!(record.inquiry.email, "jane@example.com");
    assert_eq!(record.inquiry.phone, "+1 555 0100");
    assert_eq!(record.inquiry.guests.get(), 2);
    assert_eq!(record.inquiry.message, "");
    assert_eq!(record.inquiry.status, InquiryStatus::Pending);
    assert_eq!(record.inquiry.created_at, fx.clock.now());
    assert!(record.inquiry.check_out > record.inquiry.check_in);
}

#[actix_web::test]
async fn json_inquiry_with_bad_fields_is_rejected() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let mut body = jane();
    body["email"] = json!("not-an-email");
    body["checkIn"] = json!("2025-06-01");
    body["guests"] = json!(12);

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"], "Invalid email address");
    assert_eq!(body["errors"]["checkIn"], "Check-in date cannot be in the past");
    assert_eq!(
        body["errors"]["guests"],
        "Number of guests must be between 1 and 10"
    );
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn json_inquiry_reports_store_failure_generically() {
    let fx = fixture();
    fx.store.set_failing(true);
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(jane())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Error submitting booking inquiry.");
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn booking_page_renders_empty_form() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/booking").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains(r#"min="2025-07-01""#));
    assert!(html.contains("Submit Booking Inquiry"));
}

#[actix_web::test]
async fn booking_form_success_clears_fields() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/booking")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(JANE_FORM)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Booking inquiry submitted successfully!"));
    assert!(html.contains(r#"data-dismiss-after-ms="5000""#));
    assert!(html.contains(r#"name="name" value="""#));
    assert!(!html.contains("Jane Doe"));
    assert_eq!(fx.store.len(), 1);
    assert_eq!(fx.store.records()[0].inquiry.guests.get(), 2);
}

#[actix_web::test]
async fn booking_form_store_failure_keeps_fields() {
    let fx = fixture();
    fx.store.set_failing(true);
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/booking")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(JANE_FORM)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Error submitting booking inquiry."));
    assert!(html.contains(r#"value="Jane Doe""#));
    assert!(html.contains(r#"value="2025-08-05""#));
    assert!(html.contains(r#"<option value="2" selected>2 Guests</option>"#));
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn booking_form_inline_errors_block_submission() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let payload = JANE_FORM.replace("checkOut=2025-08-05", "checkOut=2025-08-01");
    let req = test::TestRequest::post()
        .uri("/booking")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Check-out must be after check-in"));
    assert!(html.contains(r#"value="Jane Doe""#));
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn check_in_bound_moves_with_the_clock() {
    let fx = fixture();
    fx.clock.advance(Duration::days(32));
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(jane())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn health_reports_ok() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn json_nulls_and_fractions_get_field_errors() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let mut body = jane();
    body["name"] = Value::Null;
    body["message"] = Value::Null;
    body["guests"] = json!(2.5);

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["name"], "Name is required");
    assert_eq!(
        body["errors"]["guests"],
        "Number of guests must be between 1 and 10"
    );
    assert!(body["errors"].get("message").is_none());
    assert!(fx.store.is_empty());
}

#[actix_web::test]
async fn malformed_json_body_answers_in_json() {
    let fx = fixture();
    let app = test::init_service(
        App::new()
            .app_data(fx.submitter.clone())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": ["Jane"]"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert!(fx.store.is_empty());
}
