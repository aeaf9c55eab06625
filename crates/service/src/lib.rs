//! Service layer for the people registry.
//! - `people`: domain types, repository abstraction and business service.
//! - `storage`: reusable JSON file-backed stores.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod people;
pub mod runtime;
pub mod storage;
