use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const INVALID_BOOK: &str = "Invalid book data or missing required fields";
pub const DUPLICATE_BOOK: &str =
    "Book with the same title, author, ISBN, and publication date already exists";
pub const INTERNAL: &str = "Internal server error";

pub fn book_not_found(id: i32) -> String {
    format!("Book with ID {id} does not exist")
}

/// Request-boundary error: a status code and the message sent as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => ApiError::bad_request(INVALID_BOOK),
            ServiceError::Duplicate => ApiError::bad_request(DUPLICATE_BOOK),
            ServiceError::NotFound(id) => ApiError::new(StatusCode::NOT_FOUND, book_not_found(id)),
            // Storage detail stays in the log
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database bootstrap failed: {0}")]
    Bootstrap(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(e: ServiceError) -> (StatusCode, serde_json::Value) {
        let resp = ApiError::from(e).into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn service_errors_map_to_status_and_body() {
        let (s, body) = render(ServiceError::Validation("title required".into())).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BOOK);

        let (s, body) = render(ServiceError::Duplicate).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], DUPLICATE_BOOK);

        let (s, body) = render(ServiceError::NotFound(9)).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Book with ID 9 does not exist");
    }

    #[tokio::test]
    async fn storage_errors_do_not_leak_detail() {
        let (s, body) = render(ServiceError::Db("password authentication failed for user \"postgres\"".into())).await;
        assert_eq!(s, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": INTERNAL}));
    }
}
