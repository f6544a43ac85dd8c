//! # linkvault-auth
//!
//! Identity boundary for LinkVault. Bearer tokens are issued by the external
//! account service; this crate validates them and extracts the caller id.
//!
//! ## Modules
//!
//! - `jwt`: claims, HS256 validation, and token minting for fixtures and tooling

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
