//! Health check handler.

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use tracing::warn;

use linkvault_core::error::AppError;
use linkvault_core::traits::kv::KvStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let timeout = Duration::from_millis(state.config.share.store_timeout_ms);

    match tokio::time::timeout(timeout, state.store.health_check()).await {
        Ok(Ok(true)) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            store: "connected".to_string(),
        })),
        Ok(Ok(false)) => Err(AppError::service_unavailable("Store unavailable")),
        Ok(Err(e)) => {
            warn!(error = %e, "Store health check failed");
            Err(AppError::service_unavailable("Store unavailable"))
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis(), "Store health check timed out");
            Err(AppError::service_unavailable("Store unavailable"))
        }
    }
}
