//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables share ENV_MUTEX so they do
//! not interfere with each other.

use hirelink::config::{load_config, StoreKind};
use hirelink::domain::{EntityType, HireLinkError};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("HIRELINK_APPLICATION_LOG_LEVEL");
    std::env::remove_var("HIRELINK_APPLICATION_DRY_RUN");
    std::env::remove_var("HIRELINK_HTTP_TIMEOUT_SECONDS");
    std::env::remove_var("HIRELINK_HTTP_RETRY_MAX_ATTEMPTS");
    std::env::remove_var("HIRELINK_STORE_KIND");
    std::env::remove_var("HIRELINK_STORE_PATH");
    std::env::remove_var("TEST_GREENHOUSE_KEY");
    std::env::remove_var("TEST_SF_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"
dry_run = true

[http]
timeout_seconds = 45
connect_timeout_seconds = 5
tls_verify = true

[http.retry]
max_attempts = 3
initial_delay_ms = 250

[store]
kind = "json"
path = "/tmp/hirelink-test"

[logging]
local_enabled = false
local_rotation = "hourly"

[[integrations]]
name = "greenhouse"
platform = "greenhouse"
entities = ["jobs", "candidates"]

[integrations.credentials]
api_key = "gh-key"

[integrations.options]
limit = 50
job_id = "77"

[[integrations]]
name = "bamboo"
platform = "BambooHR"
entities = ["jobs"]

[integrations.credentials]
subdomain = "acme"
api_key = "bamboo-key"

[[integrations]]
name = "people"
platform = "sap-successfactors"

[integrations.credentials]
api_url = "api4.successfactors.com"
access_token = "sf-token"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.http.timeout_seconds, 45);
    assert_eq!(config.http.retry.max_attempts, 3);
    assert_eq!(config.http.retry.initial_delay_ms, 250);
    assert_eq!(config.store.kind, StoreKind::Json);
    assert_eq!(config.store.path, "/tmp/hirelink-test");
    assert_eq!(config.logging.local_rotation, "hourly");
    assert_eq!(config.integrations.len(), 3);

    let greenhouse = config.integration("greenhouse").unwrap();
    assert_eq!(
        greenhouse.effective_entities(),
        vec![EntityType::Jobs, EntityType::Candidates]
    );
    assert_eq!(greenhouse.options.limit, Some(50));
    assert_eq!(greenhouse.options.job_id.as_deref(), Some("77"));

    let people = config.integration("people").unwrap();
    assert_eq!(people.effective_entities(), vec![EntityType::Employees]);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.http.timeout_seconds, 30);
    assert_eq!(config.http.retry.max_attempts, 1);
    assert_eq!(config.store.kind, StoreKind::Memory);
    assert!(config.integrations.is_empty());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_GREENHOUSE_KEY", "substituted-key");

    let file = write_config(
        r#"
[[integrations]]
name = "gh"
platform = "greenhouse"

[integrations.credentials]
api_key = "${TEST_GREENHOUSE_KEY}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let key = config.integrations[0].credentials.api_key.as_ref().unwrap();
    {
        use secrecy::ExposeSecret;
        let value: &str = key.expose_secret().as_ref();
        assert_eq!(value, "substituted-key");
    }

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[[integrations]]
name = "people"
platform = "sap-successfactors"

[integrations.credentials]
api_url = "api4.successfactors.com"
access_token = "${TEST_SF_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, HireLinkError::Configuration(_)));
    assert!(err.to_string().contains("TEST_SF_TOKEN"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("HIRELINK_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("HIRELINK_APPLICATION_DRY_RUN", "true");
    std::env::set_var("HIRELINK_HTTP_RETRY_MAX_ATTEMPTS", "4");
    std::env::set_var("HIRELINK_STORE_KIND", "json");
    std::env::set_var("HIRELINK_STORE_PATH", "/var/lib/hirelink");

    let file = write_config(
        r#"
[application]
log_level = "info"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert!(config.application.dry_run);
    assert_eq!(config.http.retry.max_attempts, 4);
    assert_eq!(config.store.kind, StoreKind::Json);
    assert_eq!(config.store.path, "/var/lib/hirelink");

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("HIRELINK_APPLICATION_LOG_LEVEL", "loud");

    let file = write_config("");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid log_level"));

    cleanup_env_vars();
}

#[test]
fn test_integration_errors() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        (
            r#"
[[integrations]]
name = "x"
platform = "lever"
"#,
            "Unknown platform",
        ),
        (
            r#"
[[integrations]]
name = "wd"
platform = "workday"
entities = ["employees"]

[integrations.credentials]
tenant = "acme"
access_token = "t"
"#,
            "cannot sync 'employees'",
        ),
        (
            r#"
[[integrations]]
name = "bamboo"
platform = "bamboohr"
entities = ["jobs", "applications"]

[integrations.credentials]
subdomain = "acme"
api_key = "k"
"#,
            "options.job_id",
        ),
        (
            r#"
[[integrations]]
name = "gh"
platform = "greenhouse"
"#,
            "missing credentials for greenhouse: api_key",
        ),
    ];

    for (contents, expected) in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err().to_string();
        assert!(err.contains(expected), "expected '{expected}' in '{err}'");
    }
}

#[test]
fn test_production_rejects_disabled_tls() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "production"

[http]
tls_verify = false
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err
        .to_string()
        .contains("TLS certificate verification cannot be disabled in production"));
}
