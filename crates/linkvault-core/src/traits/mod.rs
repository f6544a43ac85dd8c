//! Core traits defined in `linkvault-core` and implemented by other crates.

pub mod kv;

pub use kv::{Fields, KvStore, Multi, TxCommand, TxOutcome, WatchedKey};
