//! dbrsettings - console for the ingestion configuration table.
//!
//! Lists, inspects, inserts, edits and deletes rows of the `dbrsettings`
//! table that drives the ingestion engine, through a web console, a JSON
//! API and a small CLI.

pub mod cli;
pub mod config;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod store;
pub mod utils;
