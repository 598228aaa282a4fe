use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::{InquiryStore, RecordId, StoreError};
use crate::models::BookingInquiry;

/// Stores inquiries in the `booking_inquiries` table, tagged with their collection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryStore for SqliteStore {
    async fn create(
        &self,
        collection: &str,
        inquiry: &BookingInquiry,
    ) -> Result<RecordId, StoreError> {
        // Single statement: the row exists afterwards or it does not.
        let row = sqlx::query(
            r#"
            INSERT INTO booking_inquiries
                (collection, name, email, phone, check_in, check_out, guests, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(collection)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(inquiry.check_in)
        .bind(inquiry.check_out)
        .bind(i64::from(inquiry.guests.get()))
        .bind(&inquiry.message)
        .bind(inquiry.status.as_str())
        .bind(inquiry.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(RecordId::from(row.get::<i64, _>("id").to_string()))
    }
}
