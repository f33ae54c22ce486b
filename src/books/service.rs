pub mod mem_book_service;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::catalog::CatalogResult;

// BookService is the persistence collaborator for the catalog. Implementations
// own storage and any concurrency control; the catalog service never locks.
#[async_trait]
pub trait BookService: Sync + Send {
    // returns the stored record for the id, or None when no record exists
    async fn find_book_by_id(&self, book_id: i64) -> CatalogResult<Option<BookEntity>>;

    // stores a new record, may fail
    async fn add_book(&self, book: &BookEntity) -> CatalogResult<()>;

    // replaces a stored record, may fail
    async fn update_book(&self, book: &BookEntity) -> CatalogResult<()>;

    // removes a stored record, may fail
    async fn remove_book(&self, book_id: i64) -> CatalogResult<()>;

    // true while at least one outstanding loan references the book
    async fn has_active_loans(&self, book_id: i64) -> CatalogResult<bool>;
}
