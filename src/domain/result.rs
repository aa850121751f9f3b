//! Result type alias for hirelink

use super::errors::HireLinkError;

/// Result type alias for hirelink operations
///
/// # Examples
///
/// ```
/// use hirelink::domain::result::Result;
/// use hirelink::domain::errors::HireLinkError;
///
/// fn failing_function() -> Result<()> {
///     Err(HireLinkError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HireLinkError>;
