include!("../../lib.rs");
use std::net::SocketAddr;
use axum::{
    routing::{get, post},
    Router,
};
use crate::catalog::controller::{find_book_by_id, register_book, remove_book, update_book};
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::utils::telemetry::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Configuration::new("dev");
    let catalog_service = create_catalog_service(&config).await;
    let state = AppState::new(&config, catalog_service);

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let app = Router::new()
        .route("/catalog", post(register_book))
        .route("/catalog/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state);

    tracing::info!("catalog service listening on {}", addr);
    axum::Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}
