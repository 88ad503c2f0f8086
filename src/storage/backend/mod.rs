//! SeaORM storage backend
//!
//! Database access via SeaORM, supporting SQLite, MySQL/MariaDB and
//! PostgreSQL behind one facade.

mod connection;
mod converters;
mod mutations;
mod query;

use std::time::Duration;

use moka::sync::Cache;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{ClinileadError, Result};
use crate::storage::models::LeadStatus;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_admin_user, model_to_lead, new_lead_to_active_model};

/// Infer the database type from the connection URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ClinileadError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// Lead listing filter
#[derive(Default, Clone, Copy, Debug)]
pub struct LeadFilter {
    /// Exact status match
    pub status: Option<LeadStatus>,
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// Pagination COUNT cache (30 s TTL, invalidated on writes)
    count_cache: Cache<String, u64>,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ClinileadError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            count_cache: Cache::builder()
                .time_to_live(Duration::from_secs(30))
                .max_capacity(100)
                .build(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Clear the pagination COUNT cache (called on data changes)
    pub fn invalidate_count_cache(&self) {
        self.count_cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend() {
        assert_eq!(infer_backend_from_url("sqlite://a.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mysql://h/db").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("mariadb://h/db").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgres://h/db").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://h").is_err());
    }
}
