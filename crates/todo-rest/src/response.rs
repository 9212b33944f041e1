//! The JSON envelope shared by every REST endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use todo_service::StoreError;

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize)]
pub struct Meta {
    pub per_page: i64,
    pub current_page: i64,
    pub total_page: i64,
    pub total_data: u64,
}

/// Success envelope for a single object.
#[derive(Serialize)]
pub struct ResponseSuccess<T: Serialize> {
    pub data: T,
}

/// Success envelope for a list plus its pagination metadata.
#[derive(Serialize)]
pub struct ResponseSuccessList<T: Serialize> {
    pub data: Vec<T>,
    pub meta: Meta,
}

/// Error envelope. `message` is a string for simple failures and a
/// field→message map for validation failures.
#[derive(Serialize)]
pub struct ResponseError {
    pub success: bool,
    pub message: serde_json::Value,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ResponseSuccess { data })).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ResponseSuccess { data })).into_response()
}

pub fn ok_list<T: Serialize>(data: Vec<T>, meta: Meta) -> Response {
    (StatusCode::OK, Json(ResponseSuccessList { data, meta })).into_response()
}

pub fn error(status: StatusCode, message: serde_json::Value) -> Response {
    (
        status,
        Json(ResponseError {
            success: false,
            message,
        }),
    )
        .into_response()
}

/// 422 envelope carrying per-field validation messages.
pub fn validation_error(fields: serde_json::Value) -> Response {
    error(StatusCode::UNPROCESSABLE_ENTITY, fields)
}

/// 400 envelope for an empty request body on a write endpoint.
pub fn body_required() -> Response {
    error(StatusCode::BAD_REQUEST, "body required".into())
}

/// Map the store taxonomy onto status codes.
pub fn from_store_error(err: &StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => error(StatusCode::NOT_FOUND, "Item not found".into()),
        StoreError::Timeout => error(
            StatusCode::GATEWAY_TIMEOUT,
            "datastore operation timed out".into(),
        ),
        _ => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".into(),
        ),
    }
}
