use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::catalog::PersistOutcome;
use crate::core::command::{Command, CommandError};

pub struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookCommandRequest {
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
    // applied as an increment to the stored copy count
    #[serde(default)]
    pub copies: i64,
}

impl UpdateBookCommandRequest {
    pub fn build_book(&self) -> BookDto {
        BookDto::new(self.book_id, self.title.as_str(), self.author.as_str(),
                     self.isbn.as_str(), self.genre.as_str(), self.year, self.copies)
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub outcome: PersistOutcome,
}

impl UpdateBookCommandResponse {
    pub fn new(outcome: PersistOutcome) -> Self {
        Self {
            outcome,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.update_book(&book).await
            .map_err(CommandError::from)
            .map(UpdateBookCommandResponse::new)
    }
}
