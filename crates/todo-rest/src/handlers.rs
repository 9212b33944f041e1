//! REST API handlers.
//!
//! Each handler parses and validates its input, calls the shared service,
//! and maps the result (or the error taxonomy) onto the JSON envelope.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use todo_core::TodoDraft;
use todo_core::pagination;

use crate::ApiState;
use crate::response;

/// Raw list query parameters. The numeric fields arrive as strings so a
/// non-numeric value can be reported as a validation failure instead of a
/// deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Write request body.
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// GET /
pub async fn health() -> Response {
    response::ok(json!({ "message": "Services run properly" }))
}

/// GET /todo
pub async fn list_todos(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let (raw_page, raw_per_page) = match validate_list_query(&query) {
        Ok(pair) => pair,
        Err(fields) => return response::validation_error(fields),
    };

    let current_page = pagination::current_page(raw_page);
    let per_page = pagination::per_page(raw_per_page);
    let offset = pagination::offset(current_page, per_page);
    let keyword = query.q.unwrap_or_default();

    match state
        .service
        .get_all(&keyword, per_page as u64, offset as u64)
        .await
    {
        Ok((results, total)) => {
            let meta = response::Meta {
                per_page,
                current_page,
                total_page: pagination::total_page(total as i64, per_page),
                total_data: total,
            };
            response::ok_list(results, meta)
        }
        Err(e) => response::from_store_error(&e),
    }
}

/// GET /todo/{id}
pub async fn get_todo(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.service.get_by_id(&id).await {
        Ok(todo) => response::ok(todo),
        Err(e) => response::from_store_error(&e),
    }
}

/// POST /todo
pub async fn create_todo(State(state): State<ApiState>, body: Bytes) -> Response {
    let draft = match parse_body(&body) {
        Ok(draft) => draft,
        Err(resp) => return resp,
    };

    match state.service.create(draft).await {
        Ok(todo) => response::created(todo),
        Err(e) => response::from_store_error(&e),
    }
}

/// PUT /todo/{id}
pub async fn update_todo(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let draft = match parse_body(&body) {
        Ok(draft) => draft,
        Err(resp) => return resp,
    };

    match state.service.update(&id, draft).await {
        // The service intentionally returns no record; echo the id the
        // caller already had.
        Ok(()) => response::ok(json!({ "id": id })),
        Err(e) => response::from_store_error(&e),
    }
}

/// DELETE /todo/{id}
pub async fn delete_todo(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.service.delete(&id).await {
        Ok(()) => response::ok(json!({ "id": id })),
        Err(e) => response::from_store_error(&e),
    }
}

/// Presence/type validation for the list query. Absent numeric fields
/// fall through to the pagination defaults; present ones must parse.
fn validate_list_query(query: &ListQuery) -> Result<(i64, i64), serde_json::Value> {
    let mut fields = serde_json::Map::new();

    let page = parse_numeric(query.page.as_deref());
    if page.is_none() {
        fields.insert("page".to_string(), json!("must be a number"));
    }

    let per_page = parse_numeric(query.per_page.as_deref());
    if per_page.is_none() {
        fields.insert("per_page".to_string(), json!("must be a number"));
    }

    match (page, per_page) {
        (Some(page), Some(per_page)) => Ok((page, per_page)),
        _ => Err(fields.into()),
    }
}

fn parse_numeric(raw: Option<&str>) -> Option<i64> {
    match raw {
        None | Some("") => Some(0),
        Some(value) => value.parse().ok(),
    }
}

/// Decode and validate a write body. An empty body is a distinct failure
/// from a malformed or invalid one.
fn parse_body(body: &Bytes) -> Result<TodoDraft, Response> {
    if body.is_empty() {
        return Err(response::body_required());
    }

    let request: TodoRequest = serde_json::from_slice(body)
        .map_err(|e| response::validation_error(json!({ "body": e.to_string() })))?;

    let title = request.title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(response::validation_error(json!({ "title": "is required" })));
    }

    Ok(TodoDraft {
        title,
        description: request.description.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use todo_service::Service;
    use todo_store::TodoStore;

    fn test_state() -> ApiState {
        let store = TodoStore::open_in_memory().unwrap();
        ApiState {
            service: Arc::new(Service::new(Arc::new(store))),
        }
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_body(value: serde_json::Value) -> Bytes {
        Bytes::from(serde_json::to_vec(&value).unwrap())
    }

    async fn create(state: &ApiState, title: &str) -> serde_json::Value {
        let resp = create_todo(
            State(state.clone()),
            json_body(json!({ "title": title })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let resp = health().await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["message"], "Services run properly");
    }

    #[tokio::test]
    async fn list_empty_store() {
        let state = test_state();
        let resp = list_todos(State(state), Query(ListQuery::default())).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"], json!([]));
        assert_eq!(json["meta"]["per_page"], 10);
        assert_eq!(json["meta"]["current_page"], 1);
        assert_eq!(json["meta"]["total_page"], 0);
        assert_eq!(json["meta"]["total_data"], 0);
    }

    #[tokio::test]
    async fn list_rejects_non_numeric_page() {
        let state = test_state();
        let query = ListQuery {
            page: Some("abc".to_string()),
            ..Default::default()
        };

        let resp = list_todos(State(state), Query(query)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json["message"]["page"].is_string());
    }

    #[tokio::test]
    async fn list_filters_by_keyword_case_insensitively() {
        let state = test_state();
        create(&state, "Buy milk").await;
        create(&state, "Clean house").await;

        let query = ListQuery {
            q: Some("MILK".to_string()),
            ..Default::default()
        };
        let resp = list_todos(State(state), Query(query)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["title"], "Buy milk");
        assert_eq!(json["meta"]["total_data"], 1);
        assert_eq!(json["meta"]["total_page"], 1);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let state = test_state();
        let created = create(&state, "Buy milk").await;

        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["createdAt"], created["data"]["updatedAt"]);

        let resp = get_todo(State(state), Path(id)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["title"], "Buy milk");
    }

    #[tokio::test]
    async fn create_requires_a_body() {
        let state = test_state();
        let resp = create_todo(State(state), Bytes::new()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "body required");
    }

    #[tokio::test]
    async fn create_requires_a_title() {
        let state = test_state();
        let resp = create_todo(
            State(state),
            json_body(json!({ "description": "no title here" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(resp).await;
        assert!(json["message"]["title"].is_string());
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let state = test_state();
        let resp = create_todo(State(state), Bytes::from_static(b"{not json")).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let state = test_state();
        let resp = get_todo(State(state), Path("definitely-not-an-id".to_string())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Item not found");
    }

    #[tokio::test]
    async fn update_echoes_the_id() {
        let state = test_state();
        let created = create(&state, "Buy milk").await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let resp = update_todo(
            State(state.clone()),
            Path(id.clone()),
            json_body(json!({ "title": "Buy bread" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["id"], id.as_str());

        let resp = get_todo(State(state), Path(id)).await;
        let json = body_json(resp).await;
        assert_eq!(json["data"]["title"], "Buy bread");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let state = test_state();
        let resp = update_todo(
            State(state),
            Path("definitely-not-an-id".to_string()),
            json_body(json!({ "title": "x" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_echoes_the_id_then_404s() {
        let state = test_state();
        let created = create(&state, "Buy milk").await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let resp = delete_todo(State(state.clone()), Path(id.clone())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["id"], id.as_str());

        let resp = delete_todo(State(state), Path(id)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
