//! Datastore-agnostic repository contract.

use async_trait::async_trait;
use todo_core::{Todo, TodoDraft};

use crate::error::StoreResult;

/// CRUD + keyword-search operations over the todo collection.
///
/// Ids cross this boundary as strings; a syntactically invalid id fails
/// with [`StoreError::NotFound`](crate::StoreError::NotFound) exactly like
/// an absent record. Any document or relational store can implement this
/// contract — [`TodoStore`](crate::TodoStore) is the embedded adapter.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Case-insensitive substring match on `title`, paged by
    /// `limit`/`offset`. No matches is an empty vec, never an error.
    async fn find_all(&self, keyword: &str, limit: u64, offset: u64) -> StoreResult<Vec<Todo>>;

    /// Total count for the same filter as [`find_all`](Self::find_all),
    /// ignoring pagination.
    async fn count_find_all(&self, keyword: &str) -> StoreResult<u64>;

    /// Fetch one record by id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Todo>;

    /// Count records with the given id (0 or 1); a zero count is reported
    /// as `NotFound` rather than `Ok(0)`.
    async fn count_find_by_id(&self, id: &str) -> StoreResult<u64>;

    /// Persist a new record, assigning its id and stamping both
    /// timestamps with the same instant.
    async fn store(&self, draft: TodoDraft) -> StoreResult<Todo>;

    /// Overwrite title/description and refresh `updated_at`; `id` and
    /// `created_at` are immutable. Returns the updated record.
    async fn update(&self, id: &str, draft: TodoDraft) -> StoreResult<Todo>;

    /// Hard-delete one record; removing nothing is `NotFound`.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
