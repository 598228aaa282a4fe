//! Cloud Firestore backend using the REST `createDocument` call.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{InquiryStore, RecordId, StoreError};
use crate::models::BookingInquiry;

const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct FirestoreStore {
    http: reqwest::Client,
    documents_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct CreatedDocument {
    name: String,
}

impl FirestoreStore {
    pub fn new(
        project_id: &str,
        database: &str,
        api_key: Option<String>,
    ) -> Result<Self, StoreError> {
        Self::with_base_url(DEFAULT_FIRESTORE_BASE_URL, project_id, database, api_key)
    }

    pub fn with_base_url(
        base_url: &str,
        project_id: &str,
        database: &str,
        api_key: Option<String>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        let documents_url = format!(
            "{}/projects/{project_id}/databases/{database}/documents",
            base_url.trim_end_matches('/')
        );
        Ok(Self {
            http,
            documents_url,
            api_key,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_url)
    }
}

#[async_trait]
impl InquiryStore for FirestoreStore {
    async fn create(
        &self,
        collection: &str,
        inquiry: &BookingInquiry,
    ) -> Result<RecordId, StoreError> {
        let mut request = self
            .http
            .post(self.collection_url(collection))
            .json(&document_body(inquiry));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedDocument = response.json().await?;
        document_id(&created.name)
    }
}

/// Encodes the inquiry as a Firestore document with typed field values.
pub(crate) fn document_body(inquiry: &BookingInquiry) -> Value {
    let mut fields = Map::new();
    fields.insert("name".into(), string_value(&inquiry.name));
    fields.insert("email".into(), string_value(&inquiry.email));
    fields.insert("phone".into(), string_value(&inquiry.phone));
    fields.insert("checkIn".into(), timestamp_value(inquiry.check_in));
    fields.insert("checkOut".into(), timestamp_value(inquiry.check_out));
    // Firestore carries 64-bit integers as decimal strings.
    fields.insert(
        "guests".into(),
        json!({ "integerValue": inquiry.guests.get().to_string() }),
    );
    fields.insert("message".into(), string_value(&inquiry.message));
    fields.insert("status".into(), string_value(inquiry.status.as_str()));
    fields.insert("createdAt".into(), timestamp_value(inquiry.created_at));
    json!({ "fields": fields })
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn timestamp_value(at: DateTime<Utc>) -> Value {
    json!({ "timestampValue": at.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

/// `projects/p/databases/d/documents/bookings/abc123` -> `abc123`
fn document_id(resource_name: &str) -> Result<RecordId, StoreError> {
    match resource_name.rsplit('/').next() {
        Some(id) if !id.is_empty() => Ok(RecordId::from(id)),
        _ => Err(StoreError::MalformedResponse(format!(
            "document name without id: {resource_name:?}"
        ))),
    }
}
