//! TodoStore — redb-backed persistence for the todo collection.
//!
//! Documents are JSON-serialized into a single `todo` table keyed by the
//! UUID string form. The store supports both on-disk and in-memory
//! backends (the latter for testing). Each operation runs on the blocking
//! pool and is bounded by a fixed 5-second timeout; exceeding it surfaces
//! as [`StoreError::Timeout`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use todo_core::{Todo, TodoDraft};

use crate::error::{StoreError, StoreResult};
use crate::repository::TodoRepository;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// The todo collection: UUID string key → JSON document.
const TODOS: TableDefinition<&str, &[u8]> = TableDefinition::new("todo");

/// Fixed bound on every datastore operation.
const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Thread-safe todo store backed by redb.
#[derive(Clone)]
pub struct TodoStore {
    db: Arc<Database>,
}

impl TodoStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_table()?;
        debug!(?path, "todo store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_table()?;
        debug!("in-memory todo store opened");
        Ok(store)
    }

    /// Create the table if it doesn't exist yet.
    fn ensure_table(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(TODOS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Run a blocking datastore operation under the fixed per-call bound.
    async fn bounded<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(Arc<Database>) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        match tokio::time::timeout(OP_TIMEOUT, task::spawn_blocking(move || op(db))).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(StoreError::Task(join.to_string())),
            Err(_) => Err(StoreError::Timeout),
        }
    }

    /// Parse a caller-supplied id. A malformed id is reported exactly like
    /// an absent record.
    fn parse_id(id: &str) -> StoreResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))
    }

    /// All records whose title contains `keyword` (case-insensitive),
    /// ordered by creation time. redb iterates in key order and UUID keys
    /// scatter, so pages are ordered by age with the id as tiebreak.
    fn scan_matching(db: &Database, keyword: &str) -> StoreResult<Vec<Todo>> {
        let needle = keyword.to_lowercase();
        let txn = db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TODOS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let todo: Todo =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if needle.is_empty() || todo.title.to_lowercase().contains(&needle) {
                results.push(todo);
            }
        }
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(results)
    }

    /// Fetch one record by its table key.
    fn get_by_key(db: &Database, key: &str) -> StoreResult<Option<Todo>> {
        let txn = db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TODOS).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let todo: Todo =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(todo))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn find_all(&self, keyword: &str, limit: u64, offset: u64) -> StoreResult<Vec<Todo>> {
        let keyword = keyword.to_string();
        self.bounded(move |db| {
            let matches = Self::scan_matching(&db, &keyword)?;
            Ok(matches
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        })
        .await
    }

    async fn count_find_all(&self, keyword: &str) -> StoreResult<u64> {
        let keyword = keyword.to_string();
        self.bounded(move |db| Ok(Self::scan_matching(&db, &keyword)?.len() as u64))
            .await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Todo> {
        let doc_id = Self::parse_id(id)?;
        self.bounded(move |db| {
            let key = doc_id.to_string();
            match Self::get_by_key(&db, &key)? {
                Some(todo) => Ok(todo),
                None => Err(StoreError::NotFound(key)),
            }
        })
        .await
    }

    async fn count_find_by_id(&self, id: &str) -> StoreResult<u64> {
        let doc_id = Self::parse_id(id)?;
        self.bounded(move |db| {
            let key = doc_id.to_string();
            match Self::get_by_key(&db, &key)? {
                Some(_) => Ok(1),
                None => Err(StoreError::NotFound(key)),
            }
        })
        .await
    }

    async fn store(&self, draft: TodoDraft) -> StoreResult<Todo> {
        self.bounded(move |db| {
            let now = Utc::now();
            let todo = Todo {
                id: Uuid::new_v4(),
                title: draft.title,
                description: draft.description,
                created_at: now,
                updated_at: now,
            };
            let key = todo.id.to_string();
            let value = serde_json::to_vec(&todo).map_err(map_err!(Serialize))?;
            let txn = db.begin_write().map_err(map_err!(Transaction))?;
            {
                let mut table = txn.open_table(TODOS).map_err(map_err!(Table))?;
                table
                    .insert(key.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
            }
            txn.commit().map_err(map_err!(Transaction))?;
            debug!(%key, "todo stored");
            Ok(todo)
        })
        .await
    }

    async fn update(&self, id: &str, draft: TodoDraft) -> StoreResult<Todo> {
        let doc_id = Self::parse_id(id)?;
        self.bounded(move |db| {
            let key = doc_id.to_string();
            let txn = db.begin_write().map_err(map_err!(Transaction))?;
            let updated;
            {
                let mut table = txn.open_table(TODOS).map_err(map_err!(Table))?;
                let existing = match table.get(key.as_str()).map_err(map_err!(Read))? {
                    Some(guard) => serde_json::from_slice::<Todo>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                    None => return Err(StoreError::NotFound(key)),
                };
                updated = Todo {
                    title: draft.title,
                    description: draft.description,
                    updated_at: Utc::now(),
                    ..existing
                };
                let value = serde_json::to_vec(&updated).map_err(map_err!(Serialize))?;
                table
                    .insert(key.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
            }
            txn.commit().map_err(map_err!(Transaction))?;
            debug!(%key, "todo updated");
            Ok(updated)
        })
        .await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let doc_id = Self::parse_id(id)?;
        self.bounded(move |db| {
            let key = doc_id.to_string();
            let txn = db.begin_write().map_err(map_err!(Transaction))?;
            let removed;
            {
                let mut table = txn.open_table(TODOS).map_err(map_err!(Table))?;
                removed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
            }
            txn.commit().map_err(map_err!(Transaction))?;
            if !removed {
                return Err(StoreError::NotFound(key));
            }
            debug!(%key, "todo deleted");
            Ok(())
        })
        .await
    }
}
