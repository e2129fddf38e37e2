//! Service layer providing the book CRUD rules on top of models.
//! - Validates payloads before they reach storage.
//! - Hides storage behind `BookRepository` so handlers can run against
//!   Postgres or the in-memory implementation.

pub mod errors;
pub mod book;
#[cfg(test)]
pub mod test_support;
