//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{HireLinkConfig, StoreKind};
use crate::domain::errors::HireLinkError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`HireLinkConfig`]
/// 4. Applies environment variable overrides (`HIRELINK_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`HireLinkError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use hirelink::config::load_config;
///
/// let config = load_config("hirelink.toml")?;
/// println!("{} integrations", config.integrations.len());
/// # Ok::<(), hirelink::domain::HireLinkError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HireLinkConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HireLinkError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HireLinkError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, with the same substitution,
/// override and validation steps as [`load_config`]
pub fn parse_config(contents: &str) -> Result<HireLinkConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: HireLinkConfig = toml::from_str(&contents)
        .map_err(|e| HireLinkError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        HireLinkError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| HireLinkError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HireLinkError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `HIRELINK_` prefix
///
/// Variables follow the pattern `HIRELINK_<SECTION>_<KEY>`, for example
/// `HIRELINK_HTTP_TIMEOUT_SECONDS`. Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut HireLinkConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("HIRELINK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("HIRELINK_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // HTTP overrides
    if let Ok(val) = std::env::var("HIRELINK_HTTP_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.http.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("HIRELINK_HTTP_TLS_VERIFY") {
        config.http.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HIRELINK_HTTP_RETRY_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.http.retry.max_attempts = attempts;
        }
    }

    // Store overrides
    if let Ok(val) = std::env::var("HIRELINK_STORE_KIND") {
        match val.to_lowercase().as_str() {
            "memory" => config.store.kind = StoreKind::Memory,
            "json" => config.store.kind = StoreKind::Json,
            other => tracing::warn!(value = %other, "Ignoring unknown HIRELINK_STORE_KIND"),
        }
    }
    if let Ok(val) = std::env::var("HIRELINK_STORE_PATH") {
        config.store.path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HIRELINK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HIRELINK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
