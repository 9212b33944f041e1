//! todo-service — business orchestration between the delivery layers and
//! the repository.
//!
//! Both the REST and gRPC front ends consume [`TodoService`]; one
//! [`Service`] instance per process serves them both. The layer holds no
//! state of its own and no business rules beyond pass-through composition:
//! the repository owns persistence semantics, the deliveries own protocol
//! mapping.

use std::sync::Arc;

use async_trait::async_trait;

use todo_core::{Todo, TodoDraft};
use todo_store::{StoreResult, TodoRepository};

pub use todo_store::StoreError;

/// Business operations exposed to the delivery layers.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Filtered page plus the total matching count. Two repository calls;
    /// if either fails the whole operation fails with no partial result.
    async fn get_all(&self, keyword: &str, limit: u64, offset: u64)
    -> StoreResult<(Vec<Todo>, u64)>;

    /// Pass-through fetch; propagates `NotFound` unchanged.
    async fn get_by_id(&self, id: &str) -> StoreResult<Todo>;

    /// Persist a new todo from caller-supplied title/description only.
    async fn create(&self, draft: TodoDraft) -> StoreResult<Todo>;

    /// Confirm existence first, then write. Deliberately returns no
    /// record on success — deliveries echo the id they already had.
    async fn update(&self, id: &str, draft: TodoDraft) -> StoreResult<()>;

    /// Pass-through delete; propagates `NotFound` unchanged.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// The one concrete service implementation.
pub struct Service {
    repo: Arc<dyn TodoRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TodoService for Service {
    async fn get_all(
        &self,
        keyword: &str,
        limit: u64,
        offset: u64,
    ) -> StoreResult<(Vec<Todo>, u64)> {
        let results = self.repo.find_all(keyword, limit, offset).await?;
        let total = self.repo.count_find_all(keyword).await?;
        Ok((results, total))
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Todo> {
        self.repo.find_by_id(id).await
    }

    async fn create(&self, draft: TodoDraft) -> StoreResult<Todo> {
        // Forward only the caller-writable fields; the repository assigns
        // the id and timestamps.
        self.repo
            .store(TodoDraft {
                title: draft.title,
                description: draft.description,
            })
            .await
    }

    async fn update(&self, id: &str, draft: TodoDraft) -> StoreResult<()> {
        // Existence pre-check: a missing id fails here without attempting
        // the write.
        self.repo.count_find_by_id(id).await?;
        self.repo.update(id, draft).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repo.delete(id).await
    }
}
