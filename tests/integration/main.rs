//! Integration tests driving the full router against the in-memory store.

mod auth_test;
mod config_test;
mod health_test;
mod helpers;
mod share_test;
