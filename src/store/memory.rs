use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{InquiryStore, RecordId, StoreError};
use crate::models::BookingInquiry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub collection: String,
    pub inquiry: BookingInquiry,
}

/// In-process append-only store. Can be switched to reject every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InquiryStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        inquiry: &BookingInquiry,
    ) -> Result<RecordId, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }

        let id = RecordId::from(format!(
            "inq-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1
        ));
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredRecord {
                id: id.clone(),
                collection: collection.to_string(),
                inquiry: inquiry.clone(),
            });
        Ok(id)
    }
}
