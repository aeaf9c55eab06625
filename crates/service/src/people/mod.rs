//! People module: three-layer architecture (domain, repository, service).
//!
//! Person records are appended to a flat JSON list and exported whole.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::PeopleService;
