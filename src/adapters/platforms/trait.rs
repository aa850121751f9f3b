//! Platform client trait definition
//!
//! This module defines the `PlatformClient` trait that abstracts the
//! platform-specific REST APIs behind a common interface. Operations a
//! platform does not offer keep the default implementation, which fails with
//! [`PlatformError::UnsupportedOperation`].

use crate::domain::{EntityType, FetchOptions, Platform, PlatformError, RawEntity, Result};
use async_trait::async_trait;

/// Trait for ATS/HRIS platform clients
///
/// # Example
///
/// ```no_run
/// use hirelink::adapters::platforms::{GreenhouseClient, PlatformClient};
/// use hirelink::config::{secret_string, HttpConfig, PlatformCredentials};
/// use hirelink::domain::FetchOptions;
///
/// # async fn example() -> hirelink::domain::Result<()> {
/// let credentials = PlatformCredentials {
///     api_key: Some(secret_string("harvest-key".to_string())),
///     ..Default::default()
/// };
/// let client = GreenhouseClient::new(credentials, &HttpConfig::default())?;
///
/// let jobs = client.get_jobs(&FetchOptions::default()).await?;
/// println!("Fetched {} jobs", jobs.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Platform this client talks to
    fn platform(&self) -> Platform;

    /// Base URL of the platform API
    fn base_url(&self) -> &str;

    /// Fetch job postings
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// platform has no jobs endpoint.
    async fn get_jobs(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
        Err(unsupported(self.platform(), "get_jobs"))
    }

    /// Fetch candidates
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// platform has no candidates endpoint.
    async fn get_candidates(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
        Err(unsupported(self.platform(), "get_candidates"))
    }

    /// Fetch applications
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// platform has no applications endpoint.
    async fn get_applications(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
        Err(unsupported(self.platform(), "get_applications"))
    }

    /// Fetch employees
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// platform has no employees endpoint.
    async fn get_employees(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
        Err(unsupported(self.platform(), "get_employees"))
    }

    /// Fetch records of the given entity type
    async fn fetch(
        &self,
        entity_type: EntityType,
        options: &FetchOptions,
    ) -> Result<Vec<RawEntity>> {
        match entity_type {
            EntityType::Jobs => self.get_jobs(options).await,
            EntityType::Candidates => self.get_candidates(options).await,
            EntityType::Applications => self.get_applications(options).await,
            EntityType::Employees => self.get_employees(options).await,
        }
    }
}

fn unsupported(platform: Platform, operation: &str) -> crate::domain::HireLinkError {
    PlatformError::UnsupportedOperation {
        platform: platform.to_string(),
        operation: operation.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HireLinkError;
    use serde_json::json;

    struct JobsOnly;

    #[async_trait]
    impl PlatformClient for JobsOnly {
        fn platform(&self) -> Platform {
            Platform::Greenhouse
        }

        fn base_url(&self) -> &str {
            "http://stub"
        }

        async fn get_jobs(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
            Ok(vec![RawEntity::new(json!({"id": 1}))])
        }
    }

    #[tokio::test]
    async fn test_fetch_dispatches_by_entity_type() {
        let client = JobsOnly;
        let jobs = client
            .fetch(EntityType::Jobs, &FetchOptions::default())
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_default_operations_are_unsupported() {
        let client = JobsOnly;
        let err = client
            .fetch(EntityType::Employees, &FetchOptions::default())
            .await
            .unwrap_err();

        match err {
            HireLinkError::Platform(PlatformError::UnsupportedOperation {
                platform,
                operation,
            }) => {
                assert_eq!(platform, "greenhouse");
                assert_eq!(operation, "get_employees");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
