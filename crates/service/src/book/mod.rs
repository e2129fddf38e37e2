pub mod payload;
pub mod repository;
pub mod service;

pub use payload::{validate, BookPayload};
pub use repository::{BookRepository, SeaOrmBookRepository};
pub use service::BookService;
