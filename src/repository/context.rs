//! Database context for managing connections and repository access.
//!
//! The DbContext is the primary entry point for database operations. Create
//! one per command or server, then use it to reach the repositories.
//!
//! # Example
//! ```ignore
//! let ctx = DbContext::from_url("sqlite:/data/dbrsettings.db")?;
//! ctx.init_schema().await?;
//! let records = ctx.config_records().get_all().await?;
//! ```

use std::path::Path;

use diesel_async::RunQueryDsl;

use super::config_record::ConfigRecordRepository;
use super::pool::{DieselError, SqlitePool};
use super::util::{to_diesel_error, validate_database_url};

#[derive(diesel::QueryableByName)]
struct MetaValue {
    #[diesel(sql_type = diesel::sql_types::Text)]
    value: String,
}

/// Database context that owns the connection factory.
#[derive(Clone, Debug)]
pub struct DbContext {
    pool: SqlitePool,
}

impl DbContext {
    /// Create a context from a database URL (`sqlite:` URL or file path).
    pub fn from_url(database_url: &str) -> Result<Self, DieselError> {
        validate_database_url(database_url).map_err(to_diesel_error)?;
        Ok(Self {
            pool: SqlitePool::new(database_url),
        })
    }

    /// Create a context from a SQLite file path.
    pub fn from_sqlite_path(db_path: &Path) -> Self {
        Self {
            pool: SqlitePool::from_path(db_path),
        }
    }

    /// Get a configuration record repository.
    pub fn config_records(&self) -> ConfigRecordRepository {
        ConfigRecordRepository::new(self.pool.clone())
    }

    /// Apply pending migrations. Returns the names of migrations applied.
    pub async fn init_schema(&self) -> Result<Vec<String>, DieselError> {
        super::migrations::run_migrations(self.pool.database_url()).await
    }

    /// Test that the database connection works.
    ///
    /// Call this early in application startup to fail fast on connection issues.
    pub async fn test_connection(&self) -> Result<(), DieselError> {
        let _conn = self.pool.get().await?;
        Ok(())
    }

    /// Get the current schema version from the database.
    ///
    /// Returns None if the storage_meta table doesn't exist or has no format_version entry.
    pub async fn get_schema_version(&self) -> Result<Option<String>, DieselError> {
        let mut conn = self.pool.get().await?;

        let result: Result<MetaValue, _> =
            diesel::sql_query("SELECT value FROM storage_meta WHERE key = 'format_version'")
                .get_result(&mut conn)
                .await;

        match result {
            Ok(meta) => Ok(Some(meta.value)),
            Err(DieselError::NotFound) => Ok(None),
            Err(e) if e.to_string().contains("no such table") => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_schema_version_after_init() {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_sqlite_path(&dir.path().join("ctx.db"));

        ctx.test_connection().await.unwrap();
        assert_eq!(ctx.get_schema_version().await.unwrap(), None);

        ctx.init_schema().await.unwrap();
        assert_eq!(ctx.get_schema_version().await.unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_from_url_rejects_postgres() {
        assert!(DbContext::from_url("postgresql://u@h/db").is_err());
        assert!(DbContext::from_url("sqlite:/tmp/x.db").is_ok());
    }
}
