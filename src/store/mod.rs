//! Configuration record store.
//!
//! `ConfigRecordStore` is what the web console and CLI talk to. It wraps the
//! Diesel repository with JSON normalization on the way in and a TTL cache
//! over the full listing on the way out.

mod cache;
mod error;
mod filter;
mod normalize;

use std::sync::Arc;
use std::time::Duration;

use diesel::result::DatabaseErrorKind;
use tracing::{info, warn};

pub use cache::{TtlCache, DEFAULT_TTL};
pub use error::StoreError;
pub use filter::{distinct_values, RecordFilter, ALL};
pub use normalize::{normalize_document, normalize_json_fields, JsonPolicy};

use crate::models::{ConfigFields, ConfigRecord};
use crate::repository::{ConfigRecordRepository, DbContext, DieselError};

/// Read/write access to the dbrsettings table.
///
/// Clones share the same listing cache.
#[derive(Clone)]
pub struct ConfigRecordStore {
    repo: ConfigRecordRepository,
    cache: Arc<TtlCache<Vec<ConfigRecord>>>,
    json_policy: JsonPolicy,
}

impl ConfigRecordStore {
    pub fn new(ctx: &DbContext, cache_ttl: Duration, json_policy: JsonPolicy) -> Self {
        Self {
            repo: ctx.config_records(),
            cache: Arc::new(TtlCache::with_ttl(cache_ttl)),
            json_policy,
        }
    }

    /// All records ordered by Id, served from the cache while it is fresh.
    pub async fn list_records(&self) -> Result<Vec<ConfigRecord>, StoreError> {
        let repo = &self.repo;
        self.cache
            .get_or_load(|| async { repo.get_all().await.map_err(StoreError::from) })
            .await
    }

    /// All records read straight from the database. Refreshes the cache.
    pub async fn list_records_fresh(&self) -> Result<Vec<ConfigRecord>, StoreError> {
        let generation = self.cache.generation();
        let records = self.repo.get_all().await?;
        self.cache.set_if_current(generation, records.clone());
        Ok(records)
    }

    /// Records passing `filter`, from the cached listing.
    pub async fn list_filtered(&self, filter: &RecordFilter) -> Result<Vec<ConfigRecord>, StoreError> {
        let records = self.list_records().await?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    /// A single record read from the database.
    pub async fn get_record(&self, id: i64) -> Result<Option<ConfigRecord>, StoreError> {
        Ok(self.repo.get(id).await?)
    }

    /// One past the highest existing Id, or 1 for an empty table.
    ///
    /// Always read from the database, never from the cache.
    pub async fn get_next_id(&self) -> Result<i64, StoreError> {
        let max = self.repo.max_id().await?;
        Ok(max.map_or(1, |id| id + 1))
    }

    /// Insert a new record under the next free Id and return that Id.
    ///
    /// Two concurrent inserts can compute the same Id; the loser fails with
    /// [`StoreError::DuplicateId`].
    pub async fn insert_record(&self, fields: ConfigFields) -> Result<i64, StoreError> {
        let fields = normalize_json_fields(fields, self.json_policy)?;
        let id = self.get_next_id().await?;
        let record = ConfigRecord::from_fields(id, fields);

        let result = self.repo.insert(&record).await;
        self.cache.invalidate();
        result.map_err(|e| duplicate_or_database(e, id))?;

        info!(
            "Inserted record {} ({}/{}/{})",
            id, record.system, record.domain, record.source_type
        );
        Ok(id)
    }

    /// Overwrite every non-Id field of record `id`.
    ///
    /// Returns the number of rows changed; 0 means no record had that Id.
    pub async fn update_record(&self, id: i64, fields: ConfigFields) -> Result<usize, StoreError> {
        let fields = normalize_json_fields(fields, self.json_policy)?;
        let record = ConfigRecord::from_fields(id, fields);

        let result = self.repo.update(&record).await;
        self.cache.invalidate();
        let affected = result?;

        if affected == 0 {
            warn!("Update of record {} matched no rows", id);
        } else {
            info!("Updated record {}", id);
        }
        Ok(affected)
    }

    /// Delete record `id`. Returns the number of rows removed.
    pub async fn delete_record(&self, id: i64) -> Result<usize, StoreError> {
        let result = self.repo.delete(id).await;
        self.cache.invalidate();
        let affected = result?;

        if affected == 0 {
            warn!("Delete of record {} matched no rows", id);
        } else {
            info!("Deleted record {}", id);
        }
        Ok(affected)
    }

}

fn duplicate_or_database(err: DieselError, id: i64) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::DuplicateId(id)
        }
        other => StoreError::Database(other),
    }
}
