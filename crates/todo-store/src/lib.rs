//! todo-store — persistence layer for the todo service.
//!
//! [`TodoRepository`] is the datastore-agnostic contract consumed by the
//! service layer; [`TodoStore`] is the concrete adapter backed by redb
//! with JSON-serialized documents in a single `todo` table. Every adapter
//! operation is bounded by a fixed per-call timeout.

pub mod error;
pub mod repository;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repository::TodoRepository;
pub use store::TodoStore;
