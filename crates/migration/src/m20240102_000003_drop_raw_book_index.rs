use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::m20240101_000002_add_book_unique_index::create_book_tuple_index;

/// Index over the raw text columns built by earlier revisions of the
/// previous migration. Its entries grow with the fields and hit the btree
/// entry limit on long titles.
const RAW_BOOK_INDEX: &str = "uniq_books_title_author_isbn_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!("DROP INDEX IF EXISTS {RAW_BOOK_INDEX}"))
            .await?;
        // No-op on schemas where the hashed index already exists
        create_book_tuple_index(manager).await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
