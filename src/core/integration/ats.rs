//! Applicant tracking system integration

use super::pipeline::Pipeline;
use super::report::IntegrationReport;
use super::IntegrationContext;
use crate::adapters::platforms::PlatformClient;
use crate::config::PlatformCredentials;
use crate::core::mapper::DataMapper;
use crate::core::sync::{SyncEngine, SyncResult};
use crate::domain::{EntityType, FetchOptions, IntegrationKind, Platform, Result};
use std::sync::Arc;

/// Façade over one ATS platform (Workday, BambooHR, Greenhouse)
///
/// Owns one platform client, one data mapper and one sync engine. Each sync
/// operation fetches from the client, maps the records and hands them to the
/// engine, in that order.
///
/// # Example
///
/// ```no_run
/// use hirelink::config::{secret_string, PlatformCredentials};
/// use hirelink::core::integration::AtsIntegration;
/// use hirelink::domain::FetchOptions;
///
/// # async fn example() -> hirelink::domain::Result<()> {
/// let credentials = PlatformCredentials {
///     api_key: Some(secret_string("harvest-key".to_string())),
///     ..Default::default()
/// };
///
/// let ats = AtsIntegration::new("greenhouse", credentials)?;
/// let jobs = ats.sync_jobs(&FetchOptions::default()).await?;
/// println!("Synced {} jobs", jobs.len());
/// # Ok(())
/// # }
/// ```
pub struct AtsIntegration {
    pipeline: Pipeline,
}

impl AtsIntegration {
    /// Create an ATS integration with default settings
    ///
    /// # Errors
    ///
    /// Returns `HireLinkError::UnsupportedPlatform` if `platform` is not an
    /// ATS platform, or a credential error.
    pub fn new(platform: &str, credentials: PlatformCredentials) -> Result<Self> {
        Self::with_context(platform, credentials, IntegrationContext::default())
    }

    /// Create an ATS integration with explicit HTTP settings, store and observer
    ///
    /// # Errors
    ///
    /// Same as [`AtsIntegration::new`].
    pub fn with_context(
        platform: &str,
        credentials: PlatformCredentials,
        context: IntegrationContext,
    ) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::build(platform, IntegrationKind::Ats, credentials, context)?,
        })
    }

    /// Assemble an integration from existing parts
    ///
    /// # Errors
    ///
    /// Returns an unsupported-platform error if the client is not an ATS client.
    pub fn from_parts(
        client: Arc<dyn PlatformClient>,
        mapper: DataMapper,
        engine: SyncEngine,
    ) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::from_parts(IntegrationKind::Ats, client, mapper, engine)?,
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

    /// Sync job postings
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or storing fails.
    pub async fn sync_jobs(&self, options: &FetchOptions) -> Result<SyncResult> {
        self.pipeline.run(EntityType::Jobs, options).await
    }

    /// Sync candidates
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or storing fails, or the platform has no
    /// candidates endpoint.
    pub async fn sync_candidates(&self, options: &FetchOptions) -> Result<SyncResult> {
        self.pipeline.run(EntityType::Candidates, options).await
    }

    /// Sync applications
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or storing fails, or the platform has no
    /// applications endpoint.
    pub async fn sync_applications(&self, options: &FetchOptions) -> Result<SyncResult> {
        self.pipeline.run(EntityType::Applications, options).await
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

    /// Sync every entity type the platform exposes
    ///
    /// Types that need `options.job_id` (BambooHR applications) are skipped
    /// when it is unset.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn sync_all(&self, options: &FetchOptions) -> Result<IntegrationReport> {
        let entity_types = self.platform().default_entity_types(options);
        self.sync_entities(&entity_types, options).await
    }
}
