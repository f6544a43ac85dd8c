//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `linkvault-core` (orphan rule); the
//! response body type is re-exported here.

pub use linkvault_core::error::ApiErrorResponse;
