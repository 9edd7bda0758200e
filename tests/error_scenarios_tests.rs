//! Error scenario and edge case tests
//!
//! Run with: cargo test --test error_scenarios_tests
//! Covers:
//! - Configuration errors
//! - Form validation errors
//! - Error formatting

use std::fs;
use storefront::auth::{LoginRequest, RegisterForm};
use storefront::config::loader::load_config_from_path;
use storefront::error::Error;
use storefront::Config;
use tempfile::TempDir;

// ============================================================================
// Configuration Error Tests
// ============================================================================

#[test]
fn test_error_config_not_found() {
    let err = Error::ConfigNotFound;
    let msg = err.to_string();
    assert!(msg.contains("Config file not found"));
    println!("✓ ConfigNotFound error: {}", msg);
}

#[test]
fn test_error_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storefront.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));
    assert!(err.to_string().contains("TOML"));
    println!("✓ TOML parse error: {}", err);
}

#[test]
fn test_error_config_wrong_backend() {
    let result: Result<Config, _> = toml::from_str("[storage]\nbackend = \"cookie\"");
    assert!(result.is_err(), "Unknown storage backend should be rejected");
}

#[test]
fn test_config_with_env_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storefront.toml");
    fs::write(
        &path,
        "[api]\nbase_url = \"${STOREFRONT_UNSET_URL:-http://localhost:9000/api}\"\n",
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:9000/api");
    assert_eq!(config.api.timeout_secs, 30);
}

// ============================================================================
// Validation Error Tests
// ============================================================================

#[test]
fn test_login_validation_errors_are_readable() {
    let err = LoginRequest::new("", "secret").unwrap_err();
    assert_eq!(err.to_string(), "Email is required");

    let err = LoginRequest::new("jo@", "secret").unwrap_err();
    assert!(err.to_string().contains("not a valid email"));
}

#[test]
fn test_register_missing_password() {
    let form = RegisterForm {
        name: "Jo".to_string(),
        email: "jo@x.com".to_string(),
        ..Default::default()
    };
    let err = form.into_request().unwrap_err();
    assert_eq!(err.to_string(), "Password is required");
}

// ============================================================================
// Error Formatting Tests
// ============================================================================

#[test]
fn test_api_error_displays_message_only() {
    let err = Error::Api {
        status: 409,
        message: "Email already registered".to_string(),
    };
    assert_eq!(err.to_string(), "Email already registered");
}

#[test]
fn test_not_authenticated_message() {
    assert_eq!(Error::NotAuthenticated.to_string(), "Please login to continue");
}

#[test]
fn test_anyhow_conversion() {
    let err: Error = anyhow::anyhow!("something broke").into();
    assert!(matches!(err, Error::Other(ref m) if m == "something broke"));
}
