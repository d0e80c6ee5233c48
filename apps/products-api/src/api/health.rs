//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health_detailed;
use serde_json::Value;

use crate::state::AppState;

/// 200 when every backing service answers, 503 otherwise
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut checks: Vec<(&str, HealthCheckFuture)> = Vec::new();

    if let Some(mongo) = &state.mongo {
        checks.push((
            "database",
            Box::pin(async move {
                let status = check_health_detailed(&mongo.client).await;
                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
                }
            }),
        ));
    }

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
