use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, Responder};

use crate::form::{BookingForm, SubmitStatus};
use crate::models::InquiryForm;
use crate::submitter::InquirySubmitter;
use crate::views;

pub async fn booking_page(submitter: web::Data<InquirySubmitter>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::booking_page(&BookingForm::new(), submitter.now()))
}

pub async fn submit_booking_form(
    submitter: web::Data<InquirySubmitter>,
    values: web::Form<InquiryForm>,
) -> impl Responder {
    let mut form = BookingForm::with_values(values.into_inner());
    let status = form.submit(&submitter).await;

    let mut response = match status {
        _ if !form.errors().is_empty() => HttpResponse::BadRequest(),
        SubmitStatus::Error => HttpResponse::InternalServerError(),
        SubmitStatus::Success | SubmitStatus::Idle => HttpResponse::Ok(),
    };

    response
        .content_type(ContentType::html())
        .body(views::booking_page(&form, submitter.now()))
}
