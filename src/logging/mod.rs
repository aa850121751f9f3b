//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output with an `EnvFilter`
//! - Optional JSON file output with rotation
//!
//! # Example
//!
//! ```no_run
//! use hirelink::logging::init_logging;
//! use hirelink::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a sync batch
///
/// # Example
///
/// ```no_run
/// use hirelink::log_sync_start;
/// use hirelink::domain::EntityType;
///
/// log_sync_start!("greenhouse", EntityType::Jobs, 42);
/// ```
#[macro_export]
macro_rules! log_sync_start {
    ($platform:expr, $entity_type:expr, $count:expr) => {
        tracing::info!(
            platform = %$platform,
            entity_type = %$entity_type,
            count = $count,
            "Starting sync"
        );
    };
}

/// Log the completion of a sync batch from its result
#[macro_export]
macro_rules! log_sync_complete {
    ($result:expr) => {
        tracing::info!(
            platform = %$result.platform,
            entity_type = %$result.entity_type,
            count = $result.records.len(),
            inserted = $result.inserted,
            updated = $result.updated,
            unchanged = $result.unchanged,
            dry_run = $result.dry_run,
            "Sync completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use hirelink::log_error_with_context;
/// use hirelink::domain::HireLinkError;
///
/// let error = HireLinkError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
