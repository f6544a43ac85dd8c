//! Integration tests for the shipped configuration files.

use linkvault_core::config::AppConfig;
use linkvault_core::error::ErrorKind;

#[test]
fn test_shipped_default_config_loads() {
    let config = AppConfig::load_from("config", "production").unwrap();
    assert_eq!(config.server.port, 5003);
    assert_eq!(config.store.provider, "redis");
    assert_eq!(config.share.ttl_seconds, 86_400);
    assert_eq!(config.share.store_timeout_ms, 2_000);
    assert_eq!(config.auth.leeway_seconds, 5);
}

#[test]
fn test_development_overlay_uses_memory_store() {
    let config = AppConfig::load_from("config", "development").unwrap();
    assert_eq!(config.store.provider, "memory");
    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.server.port, 5003);
}

#[tokio::test]
async fn test_server_refuses_to_start_without_jwt_secret() {
    let config = AppConfig::load_from("config", "production").unwrap();
    assert!(config.auth.jwt_secret.is_empty());

    let err = linkvault_api::run_server(config).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
