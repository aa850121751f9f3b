//! Domain models and types for hirelink.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`Platform`], [`EntityType`], [`IntegrationKind`])
//! - **Entity models** ([`RawEntity`], [`CanonicalEntity`])
//! - **Fetch filters** ([`FetchOptions`])
//! - **Error types** ([`HireLinkError`], [`PlatformError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HireLinkError>`]:
//!
//! ```rust
//! use hirelink::domain::{HireLinkError, Platform, Result};
//! use std::str::FromStr;
//!
//! fn parse(name: &str) -> Result<Platform> {
//!     Platform::from_str(name).map_err(HireLinkError::Validation)
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod options;
pub mod platform;
pub mod result;

pub use entity::{calculate_checksum, CanonicalEntity, RawEntity};
pub use errors::{HireLinkError, PlatformError};
pub use options::FetchOptions;
pub use platform::{EntityType, IntegrationKind, Platform};
pub use result::Result;
