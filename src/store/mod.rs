use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::db;
use crate::models::BookingInquiry;

pub mod firestore;
pub mod memory;
pub mod sqlite;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Identifier the store assigned to a created record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected write with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed store response: {0}")]
    MalformedResponse(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only sink for booking inquiries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Appends `inquiry` to `collection`. Either one record is created or none.
    async fn create(
        &self,
        collection: &str,
        inquiry: &BookingInquiry,
    ) -> Result<RecordId, StoreError>;
}

/// Opens the backend named by the configuration.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn InquiryStore>, StoreError> {
    match config {
        StoreConfig::Sqlite { database_url } => {
            log::info!("Connecting to database...");
            let pool = db::get_db_pool(database_url).await?;

            log::info!("Running migrations...");
            db::run_migrations(&pool).await?;

            Ok(Arc::new(SqliteStore::new(pool)))
        }
        StoreConfig::Firestore {
            project_id,
            database,
            api_key,
        } => {
            log::info!("Using Firestore project {project_id}, database {database}");
            let store = FirestoreStore::new(project_id, database, api_key.clone())?;
            Ok(Arc::new(store))
        }
        StoreConfig::Memory => {
            log::warn!("Using in-memory store; inquiries are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
