use std::sync::Arc;

use models::book;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::book::payload::BookPayload;
use crate::book::repository::BookRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the book rules: payload validation,
/// duplicate rejection on create, and not-found on unknown ids.
#[derive(Clone)]
pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<book::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.exists(id).await
    }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<book::Model, ServiceError> {
        let new_book = parse_payload(payload)?;
        let created = self.repo.create(new_book).await?;
        info!(id = created.id, title = %created.title, "book created");
        Ok(created)
    }

    /// Unknown ids are reported before the payload is looked at.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: &Value) -> Result<(), ServiceError> {
        if !self.repo.exists(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        let new_book = parse_payload(payload)?;
        // The row may vanish between the check and the write
        if !self.repo.replace(id, new_book).await? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "book updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "book deleted");
        Ok(())
    }
}

fn parse_payload(payload: &Value) -> Result<models::book::NewBook, ServiceError> {
    BookPayload::from_value(payload)
        .and_then(BookPayload::into_new_book)
        .inspect_err(|e| debug!(error = %e, "rejected book payload"))
}
