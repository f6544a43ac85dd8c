//! # linkvault-core
//!
//! Core crate for LinkVault. Contains the key-value store contract,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other LinkVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
