//! # linkvault-service
//!
//! Business logic for LinkVault share links. Services orchestrate the
//! key-value store to issue links and redeem them at most once.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. No service holds mutable
//! state; all coordination happens in the store.

pub mod context;
pub mod share;

pub use context::RequestContext;
pub use share::{IssuanceService, RedemptionService, ShareLinkStore};
