use std::collections::{HashMap, HashSet};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::books::domain::model::BookEntity;
use crate::books::service::BookService;
use crate::core::catalog::{CatalogError, CatalogResult};

// MemoryBookService keeps the catalog in process memory. It backs the dev
// binary and the command tests; loan state is tracked alongside so the
// delete guard can be exercised.
pub struct MemoryBookService {
    books: RwLock<HashMap<i64, BookEntity>>,
    loans: RwLock<HashSet<i64>>,
}

impl MemoryBookService {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
            loans: RwLock::new(HashSet::new()),
        }
    }

    pub async fn mark_loaned(&self, book_id: i64) {
        self.loans.write().await.insert(book_id);
    }

    pub async fn mark_returned(&self, book_id: i64) {
        self.loans.write().await.remove(&book_id);
    }
}

impl Default for MemoryBookService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookService for MemoryBookService {
    async fn find_book_by_id(&self, book_id: i64) -> CatalogResult<Option<BookEntity>> {
        Ok(self.books.read().await.get(&book_id).cloned())
    }

    async fn add_book(&self, book: &BookEntity) -> CatalogResult<()> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.book_id) {
            return Err(CatalogError::persistence(
                format!("book {} already stored", book.book_id).as_str(), None, false));
        }
        books.insert(book.book_id, book.clone());
        Ok(())
    }

    async fn update_book(&self, book: &BookEntity) -> CatalogResult<()> {
        let mut books = self.books.write().await;
        if !books.contains_key(&book.book_id) {
            return Err(CatalogError::persistence(
                format!("book {} not stored", book.book_id).as_str(), None, false));
        }
        books.insert(book.book_id, book.clone());
        Ok(())
    }

    async fn remove_book(&self, book_id: i64) -> CatalogResult<()> {
        let mut books = self.books.write().await;
        if books.remove(&book_id).is_none() {
            return Err(CatalogError::persistence(
                format!("book {} not stored", book_id).as_str(), None, false));
        }
        Ok(())
    }

    async fn has_active_loans(&self, book_id: i64) -> CatalogResult<bool> {
        Ok(self.loans.read().await.contains(&book_id))
    }
}
