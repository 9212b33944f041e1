//! Domain types for the todo service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored todo item.
///
/// The store is the sole writer of `id` and both timestamps; callers never
/// supply them. `created_at` is stamped once, `updated_at` is refreshed on
/// every update, so `created_at <= updated_at` always holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields of a todo — everything except the
/// store-assigned id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_wire_field_names() {
        let todo = Todo {
            id: Uuid::nil(),
            title: "Buy milk".to_string(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["title"], "Buy milk");
    }

    #[test]
    fn todo_json_round_trip() {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: "quarterly numbers".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_vec(&todo).unwrap();
        let back: Todo = serde_json::from_slice(&json).unwrap();
        assert_eq!(back, todo);
    }
}
