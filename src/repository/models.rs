//! Diesel ORM models for the dbrsettings table.
//!
//! These models provide compile-time type checking for database operations.

use diesel::prelude::*;

use crate::models::ConfigRecord;
use crate::schema;

/// Configuration row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::dbrsettings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfigRecordRow {
    pub id: i64,
    pub system: String,
    pub domain: String,
    pub source_type: String,
    pub source_settings: String,
    pub copy_queries: String,
    pub copy_settings: String,
    pub sink_settings: String,
    pub data_loading_behavior: String,
    pub entity_type: String,
    pub copy_enabled: bool,
    pub last_incremental_update: String,
    pub load_mark: bool,
    pub parse_columns: String,
    pub user_define_functions: String,
    pub last_ingestion_date: String,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date_purge: String,
}

/// Full row for insertion, Id included.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::dbrsettings)]
pub struct NewConfigRecord<'a> {
    pub id: i64,
    pub system: &'a str,
    pub domain: &'a str,
    pub source_type: &'a str,
    pub source_settings: &'a str,
    pub copy_queries: &'a str,
    pub copy_settings: &'a str,
    pub sink_settings: &'a str,
    pub data_loading_behavior: &'a str,
    pub entity_type: &'a str,
    pub copy_enabled: bool,
    pub last_incremental_update: &'a str,
    pub load_mark: bool,
    pub parse_columns: &'a str,
    pub user_define_functions: &'a str,
    pub last_ingestion_date: &'a str,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date_purge: &'a str,
}

/// Every non-Id column, for full-row updates.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = schema::dbrsettings)]
pub struct ConfigRecordChangeset<'a> {
    pub system: &'a str,
    pub domain: &'a str,
    pub source_type: &'a str,
    pub source_settings: &'a str,
    pub copy_queries: &'a str,
    pub copy_settings: &'a str,
    pub sink_settings: &'a str,
    pub data_loading_behavior: &'a str,
    pub entity_type: &'a str,
    pub copy_enabled: bool,
    pub last_incremental_update: &'a str,
    pub load_mark: bool,
    pub parse_columns: &'a str,
    pub user_define_functions: &'a str,
    pub last_ingestion_date: &'a str,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date_purge: &'a str,
}

impl From<ConfigRecordRow> for ConfigRecord {
    fn from(row: ConfigRecordRow) -> Self {
        ConfigRecord {
            id: row.id,
            system: row.system,
            domain: row.domain,
            source_type: row.source_type,
            source_settings: row.source_settings,
            copy_queries: row.copy_queries,
            copy_settings: row.copy_settings,
            sink_settings: row.sink_settings,
            data_loading_behavior: row.data_loading_behavior,
            entity_type: row.entity_type,
            copy_enabled: row.copy_enabled,
            last_incremental_update: row.last_incremental_update,
            load_mark: row.load_mark,
            parse_columns: row.parse_columns,
            user_define_functions: row.user_define_functions,
            last_ingestion_date: row.last_ingestion_date,
            status_ingestion: row.status_ingestion,
            load_purge: row.load_purge,
            last_ingestion_date_purge: row.last_ingestion_date_purge,
        }
    }
}

impl<'a> From<&'a ConfigRecord> for NewConfigRecord<'a> {
    fn from(record: &'a ConfigRecord) -> Self {
        NewConfigRecord {
            id: record.id,
            system: &record.system,
            domain: &record.domain,
            source_type: &record.source_type,
            source_settings: &record.source_settings,
            copy_queries: &record.copy_queries,
            copy_settings: &record.copy_settings,
            sink_settings: &record.sink_settings,
            data_loading_behavior: &record.data_loading_behavior,
            entity_type: &record.entity_type,
            copy_enabled: record.copy_enabled,
            last_incremental_update: &record.last_incremental_update,
            load_mark: record.load_mark,
            parse_columns: &record.parse_columns,
            user_define_functions: &record.user_define_functions,
            last_ingestion_date: &record.last_ingestion_date,
            status_ingestion: record.status_ingestion,
            load_purge: record.load_purge,
            last_ingestion_date_purge: &record.last_ingestion_date_purge,
        }
    }
}

impl<'a> From<&'a ConfigRecord> for ConfigRecordChangeset<'a> {
    fn from(record: &'a ConfigRecord) -> Self {
        ConfigRecordChangeset {
            system: &record.system,
            domain: &record.domain,
            source_type: &record.source_type,
            source_settings: &record.source_settings,
            copy_queries: &record.copy_queries,
            copy_settings: &record.copy_settings,
            sink_settings: &record.sink_settings,
            data_loading_behavior: &record.data_loading_behavior,
            entity_type: &record.entity_type,
            copy_enabled: record.copy_enabled,
            last_incremental_update: &record.last_incremental_update,
            load_mark: record.load_mark,
            parse_columns: &record.parse_columns,
            user_define_functions: &record.user_define_functions,
            last_ingestion_date: &record.last_ingestion_date,
            status_ingestion: record.status_ingestion,
            load_purge: record.load_purge,
            last_ingestion_date_purge: &record.last_ingestion_date_purge,
        }
    }
}
