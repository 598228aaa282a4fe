use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_COLLECTION: &str = "bookings";
const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite {
        database_url: String,
    },
    Firestore {
        project_id: String,
        database: String,
        api_key: Option<String>,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub collection: String,
    pub store: StoreConfig,
}

impl Config {
    /// Reads the process environment (call `dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let collection = get("INQUIRY_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let backend = get("INQUIRY_STORE").unwrap_or_else(|| "sqlite".to_string());
        let store = match backend.to_ascii_lowercase().as_str() {
            "sqlite" => StoreConfig::Sqlite {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "firestore" => StoreConfig::Firestore {
                project_id: get("FIRESTORE_PROJECT_ID")
                    .ok_or(ConfigError::Missing("FIRESTORE_PROJECT_ID"))?,
                database: get("FIRESTORE_DATABASE")
                    .unwrap_or_else(|| DEFAULT_FIRESTORE_DATABASE.to_string()),
                api_key: get("FIRESTORE_API_KEY"),
            },
            "memory" => StoreConfig::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "INQUIRY_STORE",
                    value: backend,
                })
            }
        };

        Ok(Self {
            host,
            port,
            collection,
            store,
        })
    }
}
