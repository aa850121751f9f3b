//! Platform client factory
//!
//! Selects the concrete client for a platform name. Unknown names, and names
//! of a platform belonging to the other integration kind, are rejected up
//! front so that no integration is ever built around a missing client.

use super::{
    BambooHrClient, GreenhouseClient, PlatformClient, SuccessFactorsClient, WorkdayClient,
};
use crate::config::{HttpConfig, PlatformCredentials};
use crate::domain::{HireLinkError, IntegrationKind, Platform, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Create the client for `platform`
///
/// # Errors
///
/// Returns an error if credentials required by the platform are missing or
/// the HTTP client cannot be built.
///
/// # Example
///
/// ```no_run
/// use hirelink::adapters::platforms::create_client;
/// use hirelink::config::{secret_string, HttpConfig, PlatformCredentials};
/// use hirelink::domain::Platform;
///
/// # fn example() -> hirelink::domain::Result<()> {
/// let credentials = PlatformCredentials {
///     api_key: Some(secret_string("harvest-key".to_string())),
///     ..Default::default()
/// };
/// let client = create_client(Platform::Greenhouse, credentials, &HttpConfig::default())?;
/// assert_eq!(client.platform(), Platform::Greenhouse);
/// # Ok(())
/// # }
/// ```
pub fn create_client(
    platform: Platform,
    credentials: PlatformCredentials,
    http: &HttpConfig,
) -> Result<Arc<dyn PlatformClient>> {
    let client: Arc<dyn PlatformClient> = match platform {
        Platform::Workday => Arc::new(WorkdayClient::new(credentials, http)?),
        Platform::BambooHr => Arc::new(BambooHrClient::new(credentials, http)?),
        Platform::Greenhouse => Arc::new(GreenhouseClient::new(credentials, http)?),
        Platform::SapSuccessFactors => Arc::new(SuccessFactorsClient::new(credentials, http)?),
    };

    tracing::debug!(
        platform = %platform,
        base_url = client.base_url(),
        "Created platform client"
    );

    Ok(client)
}

/// Resolve a platform name for an integration of the given kind
///
/// # Errors
///
/// Returns [`HireLinkError::UnsupportedPlatform`] if the name is unknown or
/// the platform belongs to a different kind.
pub fn resolve_platform(name: &str, kind: IntegrationKind) -> Result<Platform> {
    match Platform::from_str(name) {
        Ok(platform) if platform.kind() == kind => Ok(platform),
        _ => {
            tracing::warn!(
                platform = name,
                kind = %kind,
                supported = ?Platform::names_for(kind),
                "Unsupported platform"
            );
            Err(HireLinkError::UnsupportedPlatform {
                platform: name.to_string(),
                kind: kind.to_string(),
            })
        }
    }
}

/// Resolve `name` for `kind` and create its client
///
/// # Errors
///
/// Returns [`HireLinkError::UnsupportedPlatform`] for unknown or mismatched
/// platform names, or any error from [`create_client`].
pub fn create_client_for(
    name: &str,
    kind: IntegrationKind,
    credentials: PlatformCredentials,
    http: &HttpConfig,
) -> Result<Arc<dyn PlatformClient>> {
    let platform = resolve_platform(name, kind)?;
    create_client(platform, credentials, http)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use test_case::test_case;

    #[test_case("workday", IntegrationKind::Ats, Platform::Workday)]
    #[test_case("BambooHR", IntegrationKind::Ats, Platform::BambooHr)]
    #[test_case("greenhouse", IntegrationKind::Ats, Platform::Greenhouse)]
    #[test_case("sap-successfactors", IntegrationKind::Hris, Platform::SapSuccessFactors)]
    fn test_resolve_supported(name: &str, kind: IntegrationKind, expected: Platform) {
        assert_eq!(resolve_platform(name, kind).unwrap(), expected);
    }

    #[test_case("lever", IntegrationKind::Ats; "unknown ats")]
    #[test_case("", IntegrationKind::Hris; "empty name")]
    #[test_case("greenhouse", IntegrationKind::Hris; "ats platform as hris")]
    #[test_case("sap-successfactors", IntegrationKind::Ats; "hris platform as ats")]
    fn test_resolve_unsupported(name: &str, kind: IntegrationKind) {
        match resolve_platform(name, kind) {
            Err(HireLinkError::UnsupportedPlatform { platform, .. }) => assert_eq!(platform, name),
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
    }

    #[test]
    fn test_create_client_for_greenhouse() {
        let credentials = PlatformCredentials {
            api_key: Some(secret_string("key".to_string())),
            ..Default::default()
        };
        let client = create_client_for(
            "greenhouse",
            IntegrationKind::Ats,
            credentials,
            &HttpConfig::default(),
        )
        .unwrap();
        assert_eq!(client.platform(), Platform::Greenhouse);
    }

    #[test]
    fn test_create_client_missing_credentials() {
        let result = create_client(
            Platform::SapSuccessFactors,
            PlatformCredentials::default(),
            &HttpConfig::default(),
        );
        assert!(result.is_err());
    }
}
