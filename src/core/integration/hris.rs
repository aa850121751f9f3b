//! Human resources information system integration

use super::pipeline::Pipeline;
use super::report::IntegrationReport;
use super::IntegrationContext;
use crate::adapters::platforms::PlatformClient;
use crate::config::PlatformCredentials;
use crate::core::mapper::DataMapper;
use crate::core::sync::{SyncEngine, SyncResult};
use crate::domain::{EntityType, FetchOptions, IntegrationKind, Platform, Result};
use std::sync::Arc;

/// Façade over one HRIS platform (SAP SuccessFactors)
pub struct HrisIntegration {
    pipeline: Pipeline,
}

impl HrisIntegration {
    /// Create an HRIS integration with default settings
    ///
    /// # Errors
    ///
    /// Returns `HireLinkError::UnsupportedPlatform` if `platform` is not an
    /// HRIS platform, or a credential error.
    pub fn new(platform: &str, credentials: PlatformCredentials) -> Result<Self> {
        Self::with_context(platform, credentials, IntegrationContext::default())
    }

    /// Create an HRIS integration with explicit HTTP settings, store and observer
    ///
    /// # Errors
    ///
    /// Same as [`HrisIntegration::new`].
    pub fn with_context(
        platform: &str,
        credentials: PlatformCredentials,
        context: IntegrationContext,
    ) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::build(platform, IntegrationKind::Hris, credentials, context)?,
        })
    }

    /// Assemble an integration from existing parts
    ///
    /// # Errors
    ///
    /// Returns an unsupported-platform error if the client is not an HRIS client.
    pub fn from_parts(
        client: Arc<dyn PlatformClient>,
        mapper: DataMapper,
        engine: SyncEngine,
    ) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::from_parts(IntegrationKind::Hris, client, mapper, engine)?,
        })
    }

    /// Platform this integration talks to
    pub fn platform(&self) -> Platform {
        self.pipeline.platform()
    }

    /// Underlying platform client
    pub fn client(&self) -> &Arc<dyn PlatformClient> {
        self.pipeline.client()
    }

    /// Data mapper
    pub fn mapper(&self) -> &DataMapper {
        self.pipeline.mapper()
    }

    /// Sync engine
    pub fn engine(&self) -> &SyncEngine {
        self.pipeline.engine()
    }

    /// Sync employees
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or storing fails.
    pub async fn sync_employees(&self, options: &FetchOptions) -> Result<SyncResult> {
        self.pipeline.run(EntityType::Employees, options).await
    }

    /// Sync the given entity types in order, stopping at the first error
    ///
    /// # Errors
    ///
    /// Returns `Validation` before any fetch if a type cannot be synced with
    /// `options`, otherwise the first error encountered.
    pub async fn sync_entities(
        &self,
        entity_types: &[EntityType],
        options: &FetchOptions,
    ) -> Result<IntegrationReport> {
        self.pipeline.run_many(entity_types, options).await
    }

    /// Sync every HRIS entity type
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn sync_all(&self, options: &FetchOptions) -> Result<IntegrationReport> {
        let entity_types = self.platform().default_entity_types(options);
        self.sync_entities(&entity_types, options).await
    }
}
