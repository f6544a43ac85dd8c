//! # linkvault-cache
//!
//! Key-value store clients for LinkVault. Supports two modes:
//!
//! - **memory**: In-process store backed by [dashmap](https://crates.io/crates/dashmap),
//!   with versioned records for optimistic transactions
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate,
//!   transactions via `WATCH`/`MULTI`/`EXEC`
//!
//! The backend is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
