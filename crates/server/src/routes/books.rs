use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use common::types::MessageBody;
use serde_json::Value;
use tracing::{debug, info};

use crate::{errors::ApiError, routes::ServerState};

/// An unreadable body (bad JSON, wrong content type) is validated like any
/// other invalid payload.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(v)) => v,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "unreadable book payload");
            Value::Null
        }
    }
}

fn book_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "bad book id");
        ApiError::bad_request("Invalid book id")
    })
}

#[utoipa::path(
    get, path = "/books", tag = "books",
    responses(
        (status = 200, description = "Every book, ordered by id", body = [crate::openapi::BookDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::book::Model>>, ApiError> {
    let rows = state.books.list().await?;
    info!(count = rows.len(), "list books");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/books", tag = "books",
    request_body = crate::openapi::BookPayloadDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid or duplicate book", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    state.books.create(&json_body(body)).await?;
    Ok((StatusCode::CREATED, Json(MessageBody::new("Book created successfully"))))
}

#[utoipa::path(
    put, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    request_body = crate::openapi::BookPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid or duplicate book", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = book_id(id)?;
    state.books.update(id, &json_body(body)).await?;
    Ok(Json(MessageBody::new("Book updated successfully")))
}

#[utoipa::path(
    delete, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = book_id(id)?;
    state.books.delete(id).await?;
    Ok(Json(MessageBody::new("Book deleted successfully")))
}
