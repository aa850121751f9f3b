//! Configuration management for hirelink.
//!
//! hirelink reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HIRELINK_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [http]
//! timeout_seconds = 30
//!
//! [store]
//! kind = "json"
//! path = "/var/lib/hirelink"
//!
//! [[integrations]]
//! name = "greenhouse"
//! platform = "greenhouse"
//! entities = ["jobs", "candidates"]
//!
//! [integrations.credentials]
//! api_key = "${GREENHOUSE_API_KEY}"
//! ```
//!
//! # Sections
//!
//! - [`ApplicationConfig`] - log level and dry-run
//! - [`HttpConfig`] - timeouts, TLS and retries for platform requests
//! - [`StoreConfig`] - where synced records are written
//! - [`LoggingConfig`] - optional JSON file logging
//! - [`IntegrationConfig`] - one entry per platform connection

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, Environment, HireLinkConfig, HttpConfig, IntegrationConfig, LoggingConfig,
    PlatformCredentials, RetryConfig, StoreConfig, StoreKind,
};
pub use secret::{secret_string, SecretString, SecretValue};
