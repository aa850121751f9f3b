//! Integration façades
//!
//! [`AtsIntegration`] and [`HrisIntegration`] wire a platform client, a data
//! mapper and a sync engine into one object per platform. [`Integration`]
//! builds the right façade from an `[[integrations]]` configuration entry.

pub mod ats;
pub mod hris;
mod pipeline;
pub mod report;

pub use ats::AtsIntegration;
pub use hris::HrisIntegration;
pub use report::{EntitySummary, IntegrationFailure, IntegrationReport, RunReport};

use crate::config::{HttpConfig, IntegrationConfig};
use crate::core::sync::{MemoryStore, RecordStore, SyncObserver, TracingObserver};
use crate::domain::{EntityType, FetchOptions, HireLinkError, IntegrationKind, Platform, Result};
use std::sync::Arc;

/// Shared collaborators handed to every façade
#[derive(Clone)]
pub struct IntegrationContext {
    /// HTTP settings for the platform client
    pub http: HttpConfig,
    /// Store the sync engine writes to
    pub store: Arc<dyn RecordStore>,
    /// Observer for sync events
    pub observer: Arc<dyn SyncObserver>,
    /// Skip store writes
    pub dry_run: bool,
}

impl Default for IntegrationContext {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            store: Arc::new(MemoryStore::new()),
            observer: Arc::new(TracingObserver),
            dry_run: false,
        }
    }
}

/// Either kind of integration
pub enum Integration {
    /// ATS platform
    Ats(AtsIntegration),
    /// HRIS platform
    Hris(HrisIntegration),
}

impl Integration {
    /// Build the façade for a configured integration
    ///
    /// # Errors
    ///
    /// Returns an error for unknown platforms or missing credentials.
    pub fn from_config(config: &IntegrationConfig, context: IntegrationContext) -> Result<Self> {
        let platform = config.parsed_platform().map_err(|_| HireLinkError::UnsupportedPlatform {
            platform: config.platform.clone(),
            kind: "ATS/HRIS".to_string(),
        })?;
        let credentials = config.credentials.clone();

        match platform.kind() {
            IntegrationKind::Ats => Ok(Self::Ats(AtsIntegration::with_context(
                &config.platform,
                credentials,
                context,
            )?)),
            IntegrationKind::Hris => Ok(Self::Hris(HrisIntegration::with_context(
                &config.platform,
                credentials,
                context,
            )?)),
        }
    }

    /// Platform of the wrapped façade
    pub fn platform(&self) -> Platform {
        match self {
            Self::Ats(ats) => ats.platform(),
            Self::Hris(hris) => hris.platform(),
        }
    }

    /// Sync the given entity types in order
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn sync_entities(
        &self,
        entity_types: &[EntityType],
        options: &FetchOptions,
    ) -> Result<IntegrationReport> {
        match self {
            Self::Ats(ats) => ats.sync_entities(entity_types, options).await,
            Self::Hris(hris) => hris.sync_entities(entity_types, options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::platforms::PlatformClient;
    use crate::config::{secret_string, PlatformCredentials};
    use crate::core::mapper::DataMapper;
    use crate::core::sync::SyncEngine;
    use crate::domain::RawEntity;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubHris;

    #[async_trait]
    impl PlatformClient for StubHris {
        fn platform(&self) -> Platform {
            Platform::SapSuccessFactors
        }

        fn base_url(&self) -> &str {
            "http://stub"
        }

        async fn get_employees(&self, _options: &FetchOptions) -> Result<Vec<RawEntity>> {
            Ok(vec![
                RawEntity::new(json!({"userId": "a"})),
                RawEntity::new(json!({"userId": "b"})),
            ])
        }
    }

    fn greenhouse_credentials() -> PlatformCredentials {
        PlatformCredentials {
            api_key: Some(secret_string("key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_known_platform_builds_client() {
        let ats = AtsIntegration::new("greenhouse", greenhouse_credentials()).unwrap();
        assert_eq!(ats.platform(), Platform::Greenhouse);
        assert_eq!(ats.client().base_url(), "https://harvest.greenhouse.io/v1");
        assert_eq!(ats.mapper().platform(), "greenhouse");
    }

    #[test]
    fn test_unknown_platform_fails_fast() {
        let result = AtsIntegration::new("lever", greenhouse_credentials());
        assert!(matches!(
            result,
            Err(HireLinkError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_wrong_kind_fails_fast() {
        let result = HrisIntegration::new("greenhouse", greenhouse_credentials());
        assert!(matches!(
            result,
            Err(HireLinkError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_from_parts_checks_kind() {
        let client: Arc<dyn PlatformClient> = Arc::new(StubHris);
        let result = AtsIntegration::from_parts(
            client,
            DataMapper::new(Platform::SapSuccessFactors),
            SyncEngine::new("sap-successfactors"),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_hris_sync_employees() {
        let hris = HrisIntegration::from_parts(
            Arc::new(StubHris),
            DataMapper::new(Platform::SapSuccessFactors),
            SyncEngine::new("sap-successfactors"),
        )
        .unwrap();

        let result = hris.sync_employees(&FetchOptions::default()).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.records[1].source_id.as_deref(), Some("b"));

        let report = hris.sync_all(&FetchOptions::default()).await.unwrap();
        assert_eq!(report.entities.len(), 1);
        assert_eq!(report.entity(EntityType::Employees).unwrap().unchanged, 2);
    }

    #[tokio::test]
    async fn test_ats_entity_rejected_by_hris() {
        let hris = HrisIntegration::from_parts(
            Arc::new(StubHris),
            DataMapper::new(Platform::SapSuccessFactors),
            SyncEngine::new("sap-successfactors"),
        )
        .unwrap();

        let err = hris
            .sync_entities(&[EntityType::Jobs], &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HireLinkError::Validation(_)));
    }

    #[test]
    fn test_integration_from_config() {
        let config = IntegrationConfig {
            name: "sf".to_string(),
            platform: "sap-successfactors".to_string(),
            entities: vec![],
            credentials: PlatformCredentials {
                api_url: Some("api4.successfactors.com".to_string()),
                access_token: Some(secret_string("token".to_string())),
                ..Default::default()
            },
            options: FetchOptions::default(),
        };

        let integration = Integration::from_config(&config, IntegrationContext::default()).unwrap();
        assert!(matches!(integration, Integration::Hris(_)));
        assert_eq!(integration.platform(), Platform::SapSuccessFactors);
    }
}
