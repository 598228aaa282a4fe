use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::models::{BookingInquiry, FieldErrors, InquiryForm};
use crate::store::{InquiryStore, RecordId, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("store write failed: {0}")]
    Store(#[from] StoreError),
}

/// A record the store accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub id: RecordId,
    pub inquiry: BookingInquiry,
}

/// Validates inquiries and writes each accepted one to the store exactly once.
pub struct InquirySubmitter {
    store: Arc<dyn InquiryStore>,
    clock: Arc<dyn Clock>,
    collection: String,
}

impl InquirySubmitter {
    pub fn new(
        store: Arc<dyn InquiryStore>,
        clock: Arc<dyn Clock>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn submit(&self, form: &InquiryForm) -> Result<Submitted, SubmitError> {
        let valid = form
            .validate_at(self.clock.today())
            .map_err(SubmitError::Validation)?;

        let inquiry = BookingInquiry::pending(valid, self.clock.now());

        let id = self
            .store
            .create(&self.collection, &inquiry)
            .await
            .map_err(|e| {
                log::error!("Error submitting booking inquiry: {e}");
                SubmitError::Store(e)
            })?;

        log::info!(
            "Booking inquiry {id} stored in {}: {} to {}, {} guest(s)",
            self.collection,
            inquiry.check_in.date_naive(),
            inquiry.check_out.date_naive(),
            inquiry.guests.get()
        );

        Ok(Submitted { id, inquiry })
    }
}
