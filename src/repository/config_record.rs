//! Diesel-based repository for the dbrsettings table.
//!
//! Every statement goes through Diesel's query builder, so field values are
//! always bound parameters and never spliced into SQL text.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{ConfigRecordChangeset, ConfigRecordRow, NewConfigRecord};
use super::pool::{DieselError, SqlitePool};
use crate::models::ConfigRecord;
use crate::schema::dbrsettings;

/// Diesel-based configuration record repository.
#[derive(Clone, Debug)]
pub struct ConfigRecordRepository {
    pool: SqlitePool,
}

impl ConfigRecordRepository {
    /// Create a new repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all records, ordered by Id.
    pub async fn get_all(&self) -> Result<Vec<ConfigRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        dbrsettings::table
            .order(dbrsettings::id.asc())
            .load::<ConfigRecordRow>(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(ConfigRecord::from).collect())
    }

    /// Get a record by Id.
    pub async fn get(&self, id: i64) -> Result<Option<ConfigRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        dbrsettings::table
            .find(id)
            .first::<ConfigRecordRow>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(ConfigRecord::from))
    }

    /// Highest Id in the table, or None when the table is empty.
    pub async fn max_id(&self) -> Result<Option<i64>, DieselError> {
        let mut conn = self.pool.get().await?;

        dbrsettings::table
            .select(diesel::dsl::max(dbrsettings::id))
            .first::<Option<i64>>(&mut conn)
            .await
    }

    /// Insert a full row, Id included.
    pub async fn insert(&self, record: &ConfigRecord) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(dbrsettings::table)
            .values(&NewConfigRecord::from(record))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Rewrite every non-Id column of the row with `record.id`.
    ///
    /// Returns the number of rows affected (0 when the Id does not exist).
    pub async fn update(&self, record: &ConfigRecord) -> Result<usize, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::update(dbrsettings::table.find(record.id))
            .set(&ConfigRecordChangeset::from(record))
            .execute(&mut conn)
            .await
    }

    /// Delete all rows with the given Id.
    pub async fn delete(&self, id: i64) -> Result<usize, DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(dbrsettings::table.filter(dbrsettings::id.eq(id)))
            .execute(&mut conn)
            .await
    }
}
