//! Domain error types
//!
//! This module defines the error hierarchy for hirelink.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main hirelink error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum HireLinkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised while talking to an ATS/HRIS platform
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Platform name that has no client for the requested integration kind
    #[error("Unsupported {kind} platform: {platform}")]
    UnsupportedPlatform { platform: String, kind: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Platform-specific errors
///
/// Errors that occur when interacting with ATS/HRIS platform APIs.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to connect to the platform
    #[error("Failed to connect to platform: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded, retry after: {0}")]
    RateLimitExceeded(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Invalid response from platform: {0}")]
    InvalidResponse(String),

    /// The platform API has no endpoint for this operation
    #[error("{platform} does not support {operation}")]
    UnsupportedOperation { platform: String, operation: String },

    /// A credential field the platform needs was not supplied
    #[error("{platform} requires credential '{field}'")]
    MissingCredential { platform: String, field: String },
}

impl PlatformError {
    /// Whether a retry of the same request can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlatformError::ConnectionFailed(_)
                | PlatformError::Timeout(_)
                | PlatformError::RateLimitExceeded(_)
                | PlatformError::ServerError { .. }
        )
    }
}

impl HireLinkError {
    /// Whether the underlying failure is transient
    pub fn is_retryable(&self) -> bool {
        match self {
            HireLinkError::Platform(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for HireLinkError {
    fn from(err: std::io::Error) -> Self {
        HireLinkError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HireLinkError {
    fn from(err: serde_json::Error) -> Self {
        HireLinkError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for HireLinkError {
    fn from(err: toml::de::Error) -> Self {
        HireLinkError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HireLinkError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");

        let err = HireLinkError::UnsupportedPlatform {
            platform: "lever".to_string(),
            kind: "ATS".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported ATS platform: lever");
    }

    #[test]
    fn test_platform_error_conversion() {
        let platform_err = PlatformError::ConnectionFailed("Network error".to_string());
        let err: HireLinkError = platform_err.into();
        assert!(matches!(err, HireLinkError::Platform(_)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(PlatformError::Timeout("30s".to_string()).is_retryable());
        assert!(PlatformError::ServerError {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());
        assert!(!PlatformError::AuthenticationFailed("bad key".to_string()).is_retryable());
        assert!(!PlatformError::ClientError {
            status: 400,
            message: "bad request".to_string()
        }
        .is_retryable());

        let wrapped: HireLinkError = PlatformError::RateLimitExceeded("10".to_string()).into();
        assert!(wrapped.is_retryable());
        assert!(!HireLinkError::Validation("x".to_string()).is_retryable());
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = PlatformError::UnsupportedOperation {
            platform: "workday".to_string(),
            operation: "get_applications".to_string(),
        };
        assert_eq!(err.to_string(), "workday does not support get_applications");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: HireLinkError = json_err.into();
        assert!(matches!(err, HireLinkError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: HireLinkError = toml_err.into();
        assert!(matches!(err, HireLinkError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
