use models::book::NewBook;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// Request body of `POST /books` and `PUT /books/{id}`.
///
/// Every field is optional at the serde level so that an absent key, a
/// `null` and an empty string all end up as the same validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
}

impl BookPayload {
    /// Accepts any JSON value; anything but an object of strings is invalid.
    pub fn from_value(payload: &Value) -> Result<Self, ServiceError> {
        if !payload.is_object() {
            return Err(ServiceError::Validation("payload must be a JSON object".into()));
        }
        serde_json::from_value(payload.clone()).map_err(|e| ServiceError::Validation(e.to_string()))
    }

    pub fn into_new_book(self) -> Result<NewBook, ServiceError> {
        let title = required("title", self.title)?;
        let author = required("author", self.author)?;
        let isbn = required("isbn", self.isbn)?;
        let publication_date = required("publication_date", self.publication_date)?;
        Ok(NewBook::new(&title, &author, &isbn, &publication_date)?)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("{field} required")))
}

/// True when `payload` carries all four fields as non-empty strings and the
/// date parses.
pub fn validate(payload: &Value) -> bool {
    BookPayload::from_value(payload).and_then(BookPayload::into_new_book).is_ok()
}
