//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Full application: API, docs, middleware, `/health` and `/ready`
pub fn app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server)?
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()));
    Ok(router)
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
