//! Client → Mapper → Engine pipeline shared by the integration façades

use super::report::IntegrationReport;
use super::IntegrationContext;
use crate::adapters::platforms::{create_client_for, PlatformClient};
use crate::config::PlatformCredentials;
use crate::core::mapper::DataMapper;
use crate::core::sync::{SyncEngine, SyncResult};
use crate::domain::{EntityType, FetchOptions, HireLinkError, IntegrationKind, Platform, Result};
use std::sync::Arc;
use std::time::Instant;

pub(crate) struct Pipeline {
    kind: IntegrationKind,
    client: Arc<dyn PlatformClient>,
    mapper: DataMapper,
    engine: SyncEngine,
}

impl Pipeline {
    pub(crate) fn build(
        platform: &str,
        kind: IntegrationKind,
        credentials: PlatformCredentials,
        context: IntegrationContext,
    ) -> Result<Self> {
        let client = create_client_for(platform, kind, credentials, &context.http)?;
        let platform = client.platform();

        let engine = SyncEngine::new(platform.as_str())
            .with_store(context.store)
            .with_observer(context.observer)
            .with_dry_run(context.dry_run);

        Ok(Self {
            kind,
            client,
            mapper: DataMapper::new(platform),
            engine,
        })
    }

    pub(crate) fn from_parts(
        kind: IntegrationKind,
        client: Arc<dyn PlatformClient>,
        mapper: DataMapper,
        engine: SyncEngine,
    ) -> Result<Self> {
        let platform = client.platform();
        if platform.kind() != kind {
            return Err(HireLinkError::UnsupportedPlatform {
                platform: platform.to_string(),
                kind: kind.to_string(),
            });
        }

        Ok(Self {
            kind,
            client,
            mapper,
            engine,
        })
    }

    pub(crate) fn platform(&self) -> Platform {
        self.client.platform()
    }

    pub(crate) fn client(&self) -> &Arc<dyn PlatformClient> {
        &self.client
    }

    pub(crate) fn mapper(&self) -> &DataMapper {
        &self.mapper
    }

    pub(crate) fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Reject an entity type this integration cannot fetch with `options`
    fn check(&self, entity_type: EntityType, options: &FetchOptions) -> Result<()> {
        if !self.kind.supports(entity_type) {
            return Err(HireLinkError::Validation(format!(
                "{} integration cannot sync {}",
                self.kind, entity_type
            )));
        }

        let platform = self.platform();
        if platform.requires_job_id(entity_type) && options.job_id.is_none() {
            return Err(HireLinkError::Validation(format!(
                "{platform} lists {entity_type} per job; set options.job_id"
            )));
        }

        Ok(())
    }

    /// Fetch, map and sync one entity type
    pub(crate) async fn run(
        &self,
        entity_type: EntityType,
        options: &FetchOptions,
    ) -> Result<SyncResult> {
        self.check(entity_type, options)?;
        let platform = self.platform();

        let raws = self.client.fetch(entity_type, options).await?;
        tracing::debug!(
            platform = %platform,
            entity_type = %entity_type,
            fetched = raws.len(),
            "Fetched records"
        );

        let mapped = self.mapper.map(entity_type, raws);
        self.engine.sync(entity_type, mapped).await
    }

    /// Run each entity type in order, stopping at the first error
    ///
    /// Every entity type is checked before the first fetch, so a request that
    /// cannot complete writes nothing.
    pub(crate) async fn run_many(
        &self,
        entity_types: &[EntityType],
        options: &FetchOptions,
    ) -> Result<IntegrationReport> {
        for entity_type in entity_types {
            self.check(*entity_type, options)?;
        }

        let start = Instant::now();
        let mut report =
            IntegrationReport::new(self.platform(), self.kind, self.engine.is_dry_run());

        for entity_type in entity_types {
            let result = self.run(*entity_type, options).await?;
            report.add_result(&result);
        }

        Ok(report.with_duration(start.elapsed()))
    }
}
