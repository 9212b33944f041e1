//! todo-core — shared foundation for the todo service.
//!
//! Holds the domain types persisted by the store and exchanged by both
//! delivery layers, the pagination helpers used by the REST and gRPC
//! list paths, and the process-wide configuration loaded once at startup.

pub mod config;
pub mod pagination;
pub mod types;

pub use config::Config;
pub use types::{Todo, TodoDraft};
