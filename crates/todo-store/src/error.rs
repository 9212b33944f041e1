//! Error types for the todo store.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// `NotFound` covers both a malformed id and a genuinely absent record —
/// callers cannot (and should not need to) distinguish the two. `Timeout`
/// is raised when an operation exceeds its fixed per-call bound. The
/// remaining variants are infrastructure failures that delivery layers
/// treat as generic.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),

    #[error("blocking task error: {0}")]
    Task(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("operation timed out")]
    Timeout,
}
