//! Sync engine
//!
//! Persists canonical entities into a [`RecordStore`], one handler per
//! entity type, and reports through a [`SyncObserver`].

use super::observer::{SyncObserver, TracingObserver};
use super::result::SyncResult;
use super::store::{MemoryStore, RecordStore};
use crate::domain::{CanonicalEntity, EntityType, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Writes canonical entities for one platform into the system of record
#[derive(Clone)]
pub struct SyncEngine {
    platform: String,
    store: Arc<dyn RecordStore>,
    observer: Arc<dyn SyncObserver>,
    dry_run: bool,
}

impl SyncEngine {
    /// Create an engine with an in-memory store and tracing observer
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            store: Arc::new(MemoryStore::new()),
            observer: Arc::new(TracingObserver),
            dry_run: false,
        }
    }

    /// Use the given record store
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = store;
        self
    }

    /// Use the given observer
    pub fn with_observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Platform this engine syncs for
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Record store the engine writes to
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Sync entities of a type given by name
    ///
    /// Returns `Ok(None)` if `entity_type` names no known entity type.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync_data(
        &self,
        entity_type: &str,
        entities: Vec<CanonicalEntity>,
    ) -> Result<Option<SyncResult>> {
        match EntityType::from_str(entity_type) {
            Ok(entity_type) => self.sync(entity_type, entities).await.map(Some),
            Err(_) => {
                self.observer.unknown_entity_type(&self.platform, entity_type);
                Ok(None)
            }
        }
    }

    /// Sync entities of a known type
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync(
        &self,
        entity_type: EntityType,
        entities: Vec<CanonicalEntity>,
    ) -> Result<SyncResult> {
        match entity_type {
            EntityType::Jobs => self.sync_jobs(entities).await,
            EntityType::Candidates => self.sync_candidates(entities).await,
            EntityType::Applications => self.sync_applications(entities).await,
            EntityType::Employees => self.sync_employees(entities).await,
        }
    }

    /// Sync job records
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync_jobs(&self, jobs: Vec<CanonicalEntity>) -> Result<SyncResult> {
        self.persist(EntityType::Jobs, jobs).await
    }

    /// Sync candidate records
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync_candidates(&self, candidates: Vec<CanonicalEntity>) -> Result<SyncResult> {
        self.persist(EntityType::Candidates, candidates).await
    }

    /// Sync application records
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync_applications(
        &self,
        applications: Vec<CanonicalEntity>,
    ) -> Result<SyncResult> {
        self.persist(EntityType::Applications, applications).await
    }

    /// Sync employee records
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn sync_employees(&self, employees: Vec<CanonicalEntity>) -> Result<SyncResult> {
        self.persist(EntityType::Employees, employees).await
    }

    async fn persist(
        &self,
        entity_type: EntityType,
        entities: Vec<CanonicalEntity>,
    ) -> Result<SyncResult> {
        self.observer
            .sync_started(&self.platform, entity_type, entities.len(), self.dry_run);

        let outcome = if self.dry_run {
            self.store.preview(&entities).await?
        } else {
            self.store.upsert(&entities).await?
        };

        let result = SyncResult::new(
            self.platform.clone(),
            entity_type,
            entities,
            outcome,
            self.dry_run,
        );
        self.observer.sync_completed(&result);

        Ok(result)
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("platform", &self.platform)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
