//! ATS/HRIS platform clients
//!
//! Each platform gets a thin client over its REST API implementing
//! [`PlatformClient`]. Shared HTTP plumbing (auth headers, retries, status
//! mapping, envelope unwrapping) lives in [`http`], and [`factory`] picks a
//! client by platform.

pub mod bamboohr;
pub mod factory;
pub mod greenhouse;
pub mod http;
pub mod successfactors;
mod r#trait;
pub mod workday;

pub use bamboohr::BambooHrClient;
pub use factory::{create_client, create_client_for, resolve_platform};
pub use greenhouse::GreenhouseClient;
pub use http::{extract_items, AuthScheme, PlatformHttp};
pub use r#trait::PlatformClient;
pub use successfactors::SuccessFactorsClient;
pub use workday::WorkdayClient;

use crate::config::PlatformCredentials;
use crate::domain::{Platform, PlatformError, Result};

/// Fail with the first credential field `platform` needs but lacks
pub(crate) fn check_credentials(
    credentials: &PlatformCredentials,
    platform: Platform,
) -> Result<()> {
    match credentials.missing_fields(platform).first() {
        Some(field) => Err(missing(platform, field).into()),
        None => Ok(()),
    }
}

/// Unwrap a credential field already checked by [`check_credentials`]
pub(crate) fn require<T>(value: Option<T>, platform: Platform, field: &str) -> Result<T> {
    value.ok_or_else(|| missing(platform, field).into())
}

fn missing(platform: Platform, field: &str) -> PlatformError {
    PlatformError::MissingCredential {
        platform: platform.to_string(),
        field: field.to_string(),
    }
}
