use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::models::FieldErrors;
use crate::submitter::SubmitError;

pub const SUBMISSION_FAILED: &str = "Error submitting booking inquiry.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("booking inquiry submission failed")]
    Submission,

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Serialize)]
struct ValidationResponse<'a> {
    errors: &'a FieldErrors,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(errors) => ApiError::Validation(errors),
            // Already logged by the submitter; callers only see a generic failure.
            SubmitError::Store(_) => ApiError::Submission,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Submission => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => {
                HttpResponse::BadRequest().json(ValidationResponse { errors })
            }
            ApiError::Submission => HttpResponse::InternalServerError().json(ErrorResponse {
                error: SUBMISSION_FAILED,
            }),
            ApiError::MalformedBody(reason) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: reason })
            }
        }
    }
}
