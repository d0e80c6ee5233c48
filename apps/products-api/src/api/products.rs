//! Products API routes

use axum::Router;
use domain_products::{handlers, InMemoryProductRepository, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create products router over the configured storage
pub fn router(state: &AppState) -> Router {
    match &state.mongo {
        Some(mongo) => handlers::router(ProductService::new(MongoProductRepository::new(&mongo.db))),
        None => handlers::router(ProductService::new(InMemoryProductRepository::new())),
    }
}

/// Initialize products indexes (no-op for in-memory storage)
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    if let Some(mongo) = &state.mongo {
        MongoProductRepository::new(&mongo.db).init_indexes().await?;
    }
    Ok(())
}
