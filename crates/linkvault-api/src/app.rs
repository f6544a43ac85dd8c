//! Application builder: wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use linkvault_auth::jwt::decoder::JwtDecoder;
use linkvault_cache::provider::StoreManager;
use linkvault_core::config::AppConfig;
use linkvault_core::error::AppError;
use linkvault_core::traits::kv::KvStore;
use linkvault_service::share::{IssuanceService, RedemptionService, ShareLinkStore};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_span;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Wires services over an already-connected store.
pub fn build_state(config: AppConfig, store: StoreManager) -> AppState {
    let store = Arc::new(store);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let share_store = Arc::new(ShareLinkStore::new(
        Arc::clone(&store) as Arc<dyn KvStore>,
        &config.share,
    ));
    let issuance_service = Arc::new(IssuanceService::new(Arc::clone(&share_store)));
    let redemption_service = Arc::new(RedemptionService::new(share_store));

    AppState {
        config: Arc::new(config),
        store,
        jwt_decoder,
        issuance_service,
        redemption_service,
    }
}

/// Runs the LinkVault server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LinkVault server...");

    if config.auth.jwt_secret.trim().is_empty() {
        return Err(AppError::configuration(
            "auth.jwt_secret must be set (LINKVAULT__AUTH__JWT_SECRET)",
        ));
    }

    tracing::info!(provider = %config.store.provider, "Initializing store");
    let store = StoreManager::new(&config.store).await?;

    let addr = config.server.bind_addr();
    let app = build_app(build_state(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LinkVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("LinkVault server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
