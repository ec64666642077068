//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! against SQLite.

pub mod config_record;
pub mod context;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod util;

pub use config_record::ConfigRecordRepository;
pub use context::DbContext;
pub use pool::{DieselError, SqlitePool};
