use crate::books::service::BookService;
use crate::books::service::mem_book_service::MemoryBookService;

pub fn create_book_service() -> Box<dyn BookService> {
    Box::new(MemoryBookService::new())
}
