//! Migrator for the `books` table. Applied at server startup, so every
//! migration must be idempotent against an existing schema.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_books;
mod m20240101_000002_add_book_unique_index;
mod m20240102_000003_drop_raw_book_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_books::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_book_unique_index::Migration),
            Box::new(m20240102_000003_drop_raw_book_index::Migration),
        ]
    }
}
