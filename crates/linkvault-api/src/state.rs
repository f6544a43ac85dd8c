//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use linkvault_auth::jwt::decoder::JwtDecoder;
use linkvault_cache::provider::StoreManager;
use linkvault_core::config::AppConfig;
use linkvault_service::share::{IssuanceService, RedemptionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Key-value store (Redis or in-memory)
    pub store: Arc<StoreManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Share link issuance
    pub issuance_service: Arc<IssuanceService>,
    /// Share link redemption
    pub redemption_service: Arc<RedemptionService>,
}
