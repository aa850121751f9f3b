//! Bulk import and export
//!
//! Import reads a JSON file of raw platform records and runs it through the
//! same mapper and sync engine as a live sync. Export writes the stored
//! canonical records of one platform and entity type to a JSON file.

use crate::adapters::platforms::extract_items;
use crate::core::mapper::DataMapper;
use crate::core::sync::{RecordStore, SyncEngine, SyncObserver, SyncResult, TracingObserver};
use crate::domain::{EntityType, HireLinkError, Result};
use std::path::Path;
use std::sync::Arc;

/// Envelopes recognized in import files, in addition to a bare array
const IMPORT_ENVELOPES: &[&str] = &["/data", "/d/results", "/applications", "/records"];

/// Bulk operations against a record store
pub struct BulkOperations {
    store: Arc<dyn RecordStore>,
    observer: Arc<dyn SyncObserver>,
    dry_run: bool,
}

impl BulkOperations {
    /// Create bulk operations over `store`
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            observer: Arc::new(TracingObserver),
            dry_run: false,
        }
    }

    /// Use the given observer
    pub fn with_observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Enable or disable dry-run mode for imports
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Import raw records from a JSON file
    ///
    /// `platform` selects the mapping strategy; names without one are
    /// imported unchanged under that name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the store fails.
    pub async fn import_file(
        &self,
        platform: &str,
        entity_type: EntityType,
        path: impl AsRef<Path>,
    ) -> Result<SyncResult> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            HireLinkError::Io(format!("Failed to read import file {}: {}", path.display(), e))
        })?;

        let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            HireLinkError::Serialization(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        let raws = extract_items(body, IMPORT_ENVELOPES)?;

        tracing::info!(
            platform = platform,
            entity_type = %entity_type,
            file = %path.display(),
            records = raws.len(),
            "Importing records"
        );

        let mapper = DataMapper::for_name(platform);
        let engine = SyncEngine::new(mapper.platform())
            .with_store(self.store.clone())
            .with_observer(self.observer.clone())
            .with_dry_run(self.dry_run);

        engine.sync(entity_type, mapper.map(entity_type, raws)).await
    }

    /// Export stored records to a JSON file
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the file cannot be written.
    pub async fn export_file(
        &self,
        platform: &str,
        entity_type: EntityType,
        path: impl AsRef<Path>,
    ) -> Result<usize> {
        let path = path.as_ref();
        let records = self.store.list(platform, entity_type).await?;
        let body = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                HireLinkError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(path, body).await.map_err(|e| {
            HireLinkError::Io(format!("Failed to write export file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            platform = platform,
            entity_type = %entity_type,
            file = %path.display(),
            records = records.len(),
            "Exported records"
        );

        Ok(records.len())
    }
}
