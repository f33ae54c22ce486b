use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;

// BookEntity abstracts a catalog record in the library management system.
// A book_id of zero means the record has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub year: i32,
    pub copies: i64,
}

impl BookEntity {
    pub fn new(book_id: i64, title: &str, author: &str, isbn: &str,
               genre: &str, year: i32, copies: i64) -> Self {
        Self {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            genre: genre.to_string(),
            year,
            copies,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}
