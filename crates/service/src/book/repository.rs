use async_trait::async_trait;
use models::book::{self, NewBook};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::errors::ServiceError;

/// Storage seam for books. Implementations must make each write atomic:
/// the duplicate check travels with the insert, and replace/delete report
/// a missing row instead of silently doing nothing.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All rows, ordered by id.
    async fn list(&self) -> Result<Vec<book::Model>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    /// Insert unless a row with the same four values exists (`ServiceError::Duplicate`).
    async fn create(&self, book: NewBook) -> Result<book::Model, ServiceError>;
    /// Overwrite all four fields; false when `id` is unknown.
    async fn replace(&self, id: i32, book: NewBook) -> Result<bool, ServiceError>;
    /// Hard delete; false when `id` is unknown.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmBookRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn list(&self) -> Result<Vec<book::Model>, ServiceError> {
        Ok(book::list_all(&self.db).await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(book::exists(&self.db, id).await?)
    }

    async fn create(&self, new_book: NewBook) -> Result<book::Model, ServiceError> {
        // Pre-check and insert share a transaction; the unique index turns a
        // concurrent identical insert into ModelError::Duplicate at commit time
        let txn = self.db.begin().await?;
        if book::find_duplicate(&txn, &new_book).await?.is_some() {
            txn.rollback().await?;
            return Err(ServiceError::Duplicate);
        }
        let created = book::insert(&txn, new_book).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn replace(&self, id: i32, new_book: NewBook) -> Result<bool, ServiceError> {
        Ok(book::replace(&self.db, id, new_book).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(book::delete(&self.db, id).await?)
    }
}

/// In-memory repository with the same duplicate semantics as the unique
/// index. Used by router tests and local runs without Postgres.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Rows {
        next_id: i32,
        books: BTreeMap<i32, book::Model>,
    }

    impl Rows {
        fn holds(&self, candidate: &NewBook, except: Option<i32>) -> bool {
            self.books.values().any(|b| {
                Some(b.id) != except
                    && b.title == candidate.title
                    && b.author == candidate.author
                    && b.isbn == candidate.isbn
                    && b.publication_date == candidate.publication_date
            })
        }
    }

    #[derive(Default)]
    pub struct InMemoryBookRepository {
        rows: Mutex<Rows>,
    }

    impl InMemoryBookRepository {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize { self.rows.lock().await.books.len() }

        pub async fn is_empty(&self) -> bool { self.len().await == 0 }
    }

    #[async_trait]
    impl BookRepository for InMemoryBookRepository {
        async fn list(&self) -> Result<Vec<book::Model>, ServiceError> {
            Ok(self.rows.lock().await.books.values().cloned().collect())
        }

        async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().await.books.contains_key(&id))
        }

        async fn create(&self, new_book: NewBook) -> Result<book::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            if rows.holds(&new_book, None) {
                return Err(ServiceError::Duplicate);
            }
            rows.next_id += 1;
            let model = book::Model {
                id: rows.next_id,
                title: new_book.title,
                author: new_book.author,
                isbn: new_book.isbn,
                publication_date: new_book.publication_date,
            };
            rows.books.insert(model.id, model.clone());
            Ok(model)
        }

        async fn replace(&self, id: i32, new_book: NewBook) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            if !rows.books.contains_key(&id) {
                return Ok(false);
            }
            if rows.holds(&new_book, Some(id)) {
                return Err(ServiceError::Duplicate);
            }
            rows.books.insert(
                id,
                book::Model {
                    id,
                    title: new_book.title,
                    author: new_book.author,
                    isbn: new_book.isbn,
                    publication_date: new_book.publication_date,
                },
            );
            Ok(true)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().await.books.remove(&id).is_some())
        }
    }
}
