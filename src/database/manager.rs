use std::sync::Arc;
use tracing::info;

use super::memory::MemoryRecordStore;
use super::postgres::PgRecordStore;
use super::store::{DatabaseError, RecordStore};
use crate::config::StorageConfig;

/// Builds the record store selected by `DATABASE_URL`.
///
/// The store is created once at startup and handed to the application state;
/// callers own its shutdown via `RecordStore::close`.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn RecordStore>, DatabaseError> {
        if config.url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }

        let url = url::Url::parse(&config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "memory" => {
                info!("Using in-memory record store");
                Ok(Arc::new(MemoryRecordStore::new(config.list_limit)))
            }
            "postgres" | "postgresql" => {
                let connection_string = Self::build_connection_string(&config.url, &config.namespace)?;
                let store = PgRecordStore::connect(&connection_string, config).await?;
                info!("Created database pool for: {}", config.namespace);
                Ok(Arc::new(store))
            }
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Swap the database name in the URL path for `namespace`
    fn build_connection_string(base: &str, namespace: &str) -> Result<String, DatabaseError> {
        if !Self::is_valid_db_name(namespace) {
            return Err(DatabaseError::QueryError(format!("Invalid database name: {}", namespace)));
        }

        let mut url = url::Url::parse(base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_path(&format!("/{}", namespace));
        Ok(url.into())
    }

    fn is_valid_db_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
