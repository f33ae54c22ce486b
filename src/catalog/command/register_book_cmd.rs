use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::catalog::PersistOutcome;
use crate::core::command::{Command, CommandError};

pub struct RegisterBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RegisterBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterBookCommandRequest {
    // zero means the record has no identifier assigned yet
    #[serde(default)]
    pub book_id: i64,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub copies: i64,
}

impl RegisterBookCommandRequest {
    pub fn build_book(&self) -> BookDto {
        BookDto::new(self.book_id, self.title.as_str(), self.author.as_str(),
                     self.isbn.as_str(), self.genre.as_str(), self.year, self.copies)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterBookCommandResponse {
    pub book: BookDto,
    pub outcome: PersistOutcome,
}

impl RegisterBookCommandResponse {
    pub fn new(book: BookDto, outcome: PersistOutcome) -> Self {
        Self {
            book,
            outcome,
        }
    }
}

#[async_trait]
impl Command<RegisterBookCommandRequest, RegisterBookCommandResponse> for RegisterBookCommand {
    async fn execute(&self, req: RegisterBookCommandRequest) -> Result<RegisterBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.register_book(&book).await
            .map_err(CommandError::from)
            .map(|outcome| RegisterBookCommandResponse::new(book, outcome))
    }
}
