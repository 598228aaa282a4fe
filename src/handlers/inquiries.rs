use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::InquiryForm;
use crate::submitter::InquirySubmitter;

pub async fn create_inquiry(
    submitter: web::Data<InquirySubmitter>,
    body: web::Json<InquiryForm>,
) -> Result<HttpResponse, ApiError> {
    let submitted = submitter.submit(&body).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": submitted.id,
        "status": submitted.inquiry.status,
        "inquiry": submitted.inquiry,
        "message": "Booking inquiry submitted successfully"
    })))
}
