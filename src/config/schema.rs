//! Configuration schema types
//!
//! This module defines the configuration structure for hirelink. The root
//! [`HireLinkConfig`] maps one-to-one onto the TOML file.

use crate::config::SecretString;
use crate::domain::{EntityType, FetchOptions, IntegrationKind, Platform};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main hirelink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireLinkConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// HTTP client settings shared by all platform clients
    #[serde(default)]
    pub http: HttpConfig,

    /// Record store the sync engine writes to
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Configured platform integrations, synced in order
    #[serde(default)]
    pub integrations: Vec<IntegrationConfig>,
}

impl HireLinkConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.http.validate(&self.environment)?;
        self.store.validate()?;
        self.logging.validate()?;

        let mut names = HashSet::new();
        for integration in &self.integrations {
            integration.validate()?;
            if !names.insert(integration.name.as_str()) {
                return Err(format!(
                    "Duplicate integration name '{}'",
                    integration.name
                ));
            }
        }

        Ok(())
    }

    /// Look up an integration by name
    pub fn integration(&self, name: &str) -> Option<&IntegrationConfig> {
        self.integrations.iter().find(|i| i.name == name)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and map, but don't write to the record store)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration for platform requests
///
/// `max_attempts = 1` means a failed request is surfaced immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(format!(
                "http.retry.max_attempts must be between 1 and 10, got {}",
                self.max_attempts
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "http.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        Ok(())
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_ms(&self, attempt: usize) -> u64 {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Must stay `true` in production (enforced by validation).
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// User-Agent header sent to platforms
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl HttpConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("http.timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("http.connect_timeout_seconds must be > 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'http.tls_verify = true', or use environment = \"development\" or \"staging\" \
                when talking to a sandbox with self-signed certificates."
                    .to_string(),
            );
        }

        self.retry.validate()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            tls_verify: true,
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
        }
    }
}

/// Record store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local store, discarded on exit
    #[default]
    Memory,
    /// JSON snapshots on disk, one file per platform and entity type
    Json,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend
    #[serde(default)]
    pub kind: StoreKind,

    /// Directory for the JSON store
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.kind == StoreKind::Json && self.path.trim().is_empty() {
            return Err("store.path cannot be empty when store.kind = 'json'".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: default_store_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Credentials for one platform
///
/// Which fields are needed depends on the platform; see
/// [`PlatformCredentials::missing_fields`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformCredentials {
    /// Workday tenant name
    #[serde(default)]
    pub tenant: Option<String>,

    /// API key (BambooHR, Greenhouse)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// OAuth access token (Workday, SuccessFactors)
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// BambooHR company subdomain
    #[serde(default)]
    pub subdomain: Option<String>,

    /// SuccessFactors API host, e.g. `api4.successfactors.com`
    #[serde(default)]
    pub api_url: Option<String>,

    /// Overrides the platform base URL (sandboxes, proxies)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl PlatformCredentials {
    /// Credential fields required by `platform` that are absent or empty
    pub fn missing_fields(&self, platform: Platform) -> Vec<&'static str> {
        use secrecy::ExposeSecret;

        let has_text = |v: &Option<String>| v.as_ref().is_some_and(|s| !s.trim().is_empty());
        let has_secret =
            |v: &Option<SecretString>| v.as_ref().is_some_and(|s| !s.expose_secret().is_empty());
        let has_override = has_text(&self.base_url);

        let mut missing = Vec::new();
        match platform {
            Platform::Workday => {
                if !has_override && !has_text(&self.tenant) {
                    missing.push("tenant");
                }
                if !has_secret(&self.access_token) {
                    missing.push("access_token");
                }
            }
            Platform::BambooHr => {
                if !has_override && !has_text(&self.subdomain) {
                    missing.push("subdomain");
                }
                if !has_secret(&self.api_key) {
                    missing.push("api_key");
                }
            }
            Platform::Greenhouse => {
                if !has_secret(&self.api_key) {
                    missing.push("api_key");
                }
            }
            Platform::SapSuccessFactors => {
                if !has_override && !has_text(&self.api_url) {
                    missing.push("api_url");
                }
                if !has_secret(&self.access_token) {
                    missing.push("access_token");
                }
            }
        }
        missing
    }
}

/// One configured platform integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Unique name used on the command line
    pub name: String,

    /// Platform name (workday, bamboohr, greenhouse, sap-successfactors)
    pub platform: String,

    /// Entity types to sync (empty = all entity types of the platform's kind)
    #[serde(default)]
    pub entities: Vec<EntityType>,

    /// Platform credentials
    #[serde(default)]
    pub credentials: PlatformCredentials,

    /// Fetch filters applied to every sync of this integration
    #[serde(default)]
    pub options: FetchOptions,
}

impl IntegrationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("integrations.name cannot be empty".to_string());
        }

        let platform = self.parsed_platform()?;
        let kind = platform.kind();

        for entity in &self.entities {
            if !platform.supports(*entity) {
                return Err(format!(
                    "Integration '{}': {} platform '{}' cannot sync '{}'",
                    self.name, kind, platform, entity
                ));
            }
        }

        if self.options.job_id.is_none() {
            if let Some(entity) = self.entities.iter().find(|e| platform.requires_job_id(**e)) {
                return Err(format!(
                    "Integration '{}': {} lists {} per job; set options.job_id \
                     or leave '{}' out of entities",
                    self.name, platform, entity, entity
                ));
            }
        }

        let missing = self.credentials.missing_fields(platform);
        if !missing.is_empty() {
            return Err(format!(
                "Integration '{}': missing credentials for {}: {}",
                self.name,
                platform,
                missing.join(", ")
            ));
        }

        if let Some(ref base_url) = self.credentials.base_url {
            url::Url::parse(base_url).map_err(|e| {
                format!(
                    "Integration '{}': invalid credentials.base_url '{}': {}",
                    self.name, base_url, e
                )
            })?;
        }

        Ok(())
    }

    /// Parse the platform name
    pub fn parsed_platform(&self) -> Result<Platform, String> {
        Platform::from_str(&self.platform)
            .map_err(|e| format!("Integration '{}': {}", self.name, e))
    }

    /// Kind of the configured platform, if the name is valid
    pub fn kind(&self) -> Option<IntegrationKind> {
        self.parsed_platform().ok().map(|p| p.kind())
    }

    /// Entity types to sync, defaulting to everything the platform exposes
    ///
    /// The default leaves out job-scoped types when `options.job_id` is unset.
    pub fn effective_entities(&self) -> Vec<EntityType> {
        if !self.entities.is_empty() {
            return self.entities.clone();
        }
        self.parsed_platform()
            .map(|p| p.default_entity_types(&self.options))
            .unwrap_or_default()
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("hirelink/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> usize {
    1
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_store_path() -> String {
    "./hirelink-data".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn greenhouse_integration() -> IntegrationConfig {
        IntegrationConfig {
            name: "gh".to_string(),
            platform: "greenhouse".to_string(),
            entities: vec![],
            credentials: PlatformCredentials {
                api_key: Some(secret_string("key".to_string())),
                ..Default::default()
            },
            options: FetchOptions::default(),
        }
    }

    fn config_with(integrations: Vec<IntegrationConfig>) -> HireLinkConfig {
        HireLinkConfig {
            application: ApplicationConfig::default(),
            environment: Environment::Development,
            http: HttpConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            integrations,
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_delay_backoff() {
        let retry = RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
        };
        assert_eq!(retry.delay_ms(1), 100);
        assert_eq!(retry.delay_ms(2), 200);
        assert_eq!(retry.delay_ms(3), 350);
    }

    #[test]
    fn test_retry_validation() {
        let mut retry = RetryConfig::default();
        assert_eq!(retry.max_attempts, 1);
        assert!(retry.validate().is_ok());

        retry.max_attempts = 0;
        assert!(retry.validate().is_err());

        retry.max_attempts = 3;
        retry.backoff_multiplier = 0.5;
        assert!(retry.validate().is_err());
    }

    #[test]
    fn test_tls_verification_in_production() {
        let http = HttpConfig {
            tls_verify: false,
            ..Default::default()
        };

        let result = http.validate(&Environment::Production);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("TLS certificate verification cannot be disabled in production"));

        assert!(http.validate(&Environment::Development).is_ok());
        assert!(http.validate(&Environment::Staging).is_ok());
    }

    #[test]
    fn test_missing_credentials_per_platform() {
        let empty = PlatformCredentials::default();
        assert_eq!(
            empty.missing_fields(Platform::Workday),
            vec!["tenant", "access_token"]
        );
        assert_eq!(
            empty.missing_fields(Platform::BambooHr),
            vec!["subdomain", "api_key"]
        );
        assert_eq!(empty.missing_fields(Platform::Greenhouse), vec!["api_key"]);
        assert_eq!(
            empty.missing_fields(Platform::SapSuccessFactors),
            vec!["api_url", "access_token"]
        );
    }

    #[test]
    fn test_base_url_override_replaces_host_fields() {
        let creds = PlatformCredentials {
            access_token: Some(secret_string("token".to_string())),
            base_url: Some("http://localhost:9000".to_string()),
            ..Default::default()
        };
        assert!(creds.missing_fields(Platform::Workday).is_empty());
        assert!(creds.missing_fields(Platform::SapSuccessFactors).is_empty());
    }

    #[test]
    fn test_integration_validation() {
        assert!(config_with(vec![greenhouse_integration()]).validate().is_ok());

        let mut unknown = greenhouse_integration();
        unknown.platform = "lever".to_string();
        let err = config_with(vec![unknown]).validate().unwrap_err();
        assert!(err.contains("Unknown platform"));

        let mut wrong_entity = greenhouse_integration();
        wrong_entity.entities = vec![EntityType::Employees];
        let err = config_with(vec![wrong_entity]).validate().unwrap_err();
        assert!(err.contains("cannot sync 'employees'"));

        let mut bad_url = greenhouse_integration();
        bad_url.credentials.base_url = Some("not a url".to_string());
        assert!(config_with(vec![bad_url]).validate().is_err());
    }

    #[test]
    fn test_duplicate_integration_names() {
        let config = config_with(vec![greenhouse_integration(), greenhouse_integration()]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("Duplicate integration name 'gh'"));
    }

    #[test]
    fn test_effective_entities_defaults_to_platform() {
        let integration = greenhouse_integration();
        assert_eq!(
            integration.effective_entities(),
            vec![
                EntityType::Jobs,
                EntityType::Candidates,
                EntityType::Applications
            ]
        );

        let mut only_jobs = greenhouse_integration();
        only_jobs.entities = vec![EntityType::Jobs];
        assert_eq!(only_jobs.effective_entities(), vec![EntityType::Jobs]);

        let mut workday = greenhouse_integration();
        workday.platform = "workday".to_string();
        assert_eq!(
            workday.effective_entities(),
            vec![EntityType::Jobs, EntityType::Candidates]
        );
    }

    #[test]
    fn test_bamboohr_applications_need_job_id() {
        let mut bamboo = greenhouse_integration();
        bamboo.platform = "bamboohr".to_string();
        bamboo.credentials.subdomain = Some("acme".to_string());

        // The default entity list simply leaves applications out
        assert!(config_with(vec![bamboo.clone()]).validate().is_ok());
        assert_eq!(bamboo.effective_entities(), vec![EntityType::Jobs]);

        bamboo.entities = vec![EntityType::Jobs, EntityType::Applications];
        let err = config_with(vec![bamboo.clone()]).validate().unwrap_err();
        assert!(err.contains("options.job_id"));
        assert!(err.contains("'applications'"));

        bamboo.entities = vec![];
        bamboo.options = FetchOptions::new().with_job_id("17");
        assert!(config_with(vec![bamboo.clone()]).validate().is_ok());
        assert_eq!(
            bamboo.effective_entities(),
            vec![EntityType::Jobs, EntityType::Applications]
        );
    }

    #[test]
    fn test_platform_specific_entities() {
        let mut bamboo = greenhouse_integration();
        bamboo.platform = "bamboohr".to_string();
        bamboo.credentials.subdomain = Some("acme".to_string());
        bamboo.entities = vec![EntityType::Candidates];

        let err = config_with(vec![bamboo]).validate().unwrap_err();
        assert!(err.contains("cannot sync 'candidates'"));
    }

    #[test]
    fn test_store_validation() {
        let store = StoreConfig {
            kind: StoreKind::Json,
            path: " ".to_string(),
        };
        assert!(store.validate().is_err());
        assert!(StoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_logging_validation() {
        let mut logging = LoggingConfig::default();
        assert!(logging.validate().is_ok());

        logging.local_rotation = "weekly".to_string();
        assert!(logging.validate().is_err());
    }
}
