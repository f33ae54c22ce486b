pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::catalog::{CatalogResult, PersistOutcome};

// CatalogService coordinates catalog changes: it validates each request and
// delegates storage to the BookService collaborator. Validation failures are
// returned as errors before any persistence call; a failure of the delegated
// persist call itself surfaces as PersistOutcome::PersistenceFailed.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn register_book(&self, book: &BookDto) -> CatalogResult<PersistOutcome>;
    async fn update_book(&self, book: &BookDto) -> CatalogResult<PersistOutcome>;
    async fn remove_book(&self, book_id: i64) -> CatalogResult<PersistOutcome>;
    async fn find_book_by_id(&self, book_id: i64) -> CatalogResult<BookDto>;
}
