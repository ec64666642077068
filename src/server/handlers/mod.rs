//! HTTP request handlers for the web console.

mod api;
mod delete;
mod edit;
mod helpers;
mod insert;
mod records;
mod static_files;

// Re-export handlers for use by the router
pub use api::{
    api_create_record, api_delete_record, api_get_record, api_list_records, api_update_record,
};
pub use delete::{delete_confirm, delete_record};
pub use edit::{edit_record_form, update_record};
pub use insert::{create_record, new_record_form};
pub use records::{index, list_records, record_detail};
pub use static_files::{health, serve_css};
