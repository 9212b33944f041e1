//! todo-rest — REST delivery for the todo service.
//!
//! Thin axum front end over the shared service layer. Every endpoint
//! answers with the same JSON envelope: `{"data": ...}` (plus `"meta"` on
//! lists) on success, `{"success": false, "message": ...}` on failure.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Liveness envelope |
//! | GET | `/todo` | List todos (`q`, `page`, `per_page`) |
//! | POST | `/todo` | Create a todo |
//! | GET | `/todo/{id}` | Get one todo |
//! | PUT | `/todo/{id}` | Update title/description |
//! | DELETE | `/todo/{id}` | Delete a todo |

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use todo_service::TodoService;

/// Shared state for REST handlers.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<dyn TodoService>,
}

/// Build the complete REST router over one service instance.
pub fn build_router(service: Arc<dyn TodoService>) -> Router {
    let state = ApiState { service };

    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/todo",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todo/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
