use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

/// Unique over (md5(title), md5(author), md5(isbn), publication_date).
/// Hashing the text columns keeps every index entry a fixed size, so the
/// btree entry limit never caps how long a field may be.
pub(crate) const BOOK_TUPLE_INDEX: &str = "uniq_books_tuple_md5";

const CREATE_BOOK_TUPLE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS uniq_books_tuple_md5 \
     ON books (md5(title), md5(author), md5(isbn), publication_date)";

const COUNT_DUPLICATE_TUPLES: &str = "SELECT COUNT(*) AS n FROM (\
     SELECT 1 FROM books GROUP BY title, author, isbn, publication_date HAVING COUNT(*) > 1\
     ) dup";

/// Build the tuple index. Tables written by older deployments may already
/// hold duplicate tuples; those are reported instead of being deleted.
pub(crate) async fn create_book_tuple_index(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = manager.get_database_backend();
    let duplicates = db
        .query_one(Statement::from_string(backend, COUNT_DUPLICATE_TUPLES.to_string()))
        .await?
        .map(|row| row.try_get::<i64>("", "n"))
        .transpose()?
        .unwrap_or(0);
    if duplicates > 0 {
        return Err(DbErr::Migration(format!(
            "books holds {duplicates} duplicated (title, author, isbn, publication_date) tuple(s); \
             remove the extra rows before starting the service"
        )));
    }
    db.execute_unprepared(CREATE_BOOK_TUPLE_INDEX).await?;
    Ok(())
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_book_tuple_index(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!("DROP INDEX IF EXISTS {BOOK_TUPLE_INDEX}"))
            .await?;
        Ok(())
    }
}
