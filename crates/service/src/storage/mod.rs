//! Storage abstractions for service layer
//!
//! File-backed stores that persist small collections as a single JSON
//! document, read and rewritten whole on every call.

pub mod json_list_store;

pub use json_list_store::JsonListStore;
