//! State of one booking form: field values, inline errors and the result notice.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{FieldErrors, InquiryForm};
use crate::submitter::{InquirySubmitter, SubmitError, Submitted};

/// How long the success notice stays visible.
pub const SUCCESS_NOTICE_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    values: InquiryForm,
    errors: FieldErrors,
    status: SubmitStatus,
    submitting: bool,
    success_at: Option<DateTime<Utc>>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: InquiryForm) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &InquiryForm {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// True while a submission is in flight; the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Status as seen at `now`: a success notice lapses back to idle, and no
    /// notice shows while a submission is in flight.
    pub fn status_at(&self, now: DateTime<Utc>) -> SubmitStatus {
        if self.submitting {
            return SubmitStatus::Idle;
        }
        match (self.status, self.success_at) {
            (SubmitStatus::Success, Some(at)) if now - at >= Duration::seconds(SUCCESS_NOTICE_SECS) => {
                SubmitStatus::Idle
            }
            (status, _) => status,
        }
    }

    pub fn expire_notice(&mut self, now: DateTime<Utc>) {
        if self.status_at(now) != self.status {
            self.status = SubmitStatus::Idle;
            self.success_at = None;
        }
    }

    /// Starts a submission, or returns `None` if one is already in flight.
    pub fn begin_submit(&mut self) -> Option<InquiryForm> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.values.clone())
    }

    /// Applies the outcome. A blocked (invalid) submission never went out, so the
    /// previous notice stays as it was.
    pub fn finish_submit(&mut self, outcome: Result<Submitted, SubmitError>) -> SubmitStatus {
        self.submitting = false;
        match outcome {
            Ok(submitted) => {
                self.values = InquiryForm::default();
                self.errors = FieldErrors::default();
                self.status = SubmitStatus::Success;
                self.success_at = Some(submitted.inquiry.created_at);
            }
            Err(SubmitError::Validation(errors)) => {
                self.errors = errors;
            }
            Err(SubmitError::Store(_)) => {
                self.errors = FieldErrors::default();
                self.status = SubmitStatus::Error;
                self.success_at = None;
            }
        }
        self.status
    }

    pub async fn submit(&mut self, submitter: &InquirySubmitter) -> SubmitStatus {
        let Some(values) = self.begin_submit() else {
            return self.status;
        };
        let outcome = submitter.submit(&values).await;
        self.finish_submit(outcome)
    }
}
