use std::sync::Arc;
use crate::books::factory::create_book_service;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;

// The catalog service is shared across requests so that every handler sees
// the same underlying book store.
pub async fn create_catalog_service(config: &Configuration) -> Arc<dyn CatalogService> {
    let book_service = create_book_service();
    let publisher = create_publisher().await;
    Arc::new(CatalogServiceImpl::new(config, book_service, publisher))
}
