//! # linkvault-api
//!
//! HTTP API layer for LinkVault built on Axum.
//!
//! Provides the share link endpoints, the health probe, middleware
//! (logging, CORS, tracing), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
