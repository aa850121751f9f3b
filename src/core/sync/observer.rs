//! Sync observers
//!
//! The engine reports progress through a [`SyncObserver`] instead of logging
//! directly, so callers can collect events or silence them.

use super::result::SyncResult;
use crate::domain::EntityType;

/// Receives sync engine events
pub trait SyncObserver: Send + Sync {
    /// A batch is about to be synced
    fn sync_started(&self, platform: &str, entity_type: EntityType, count: usize, dry_run: bool);

    /// A batch finished syncing
    fn sync_completed(&self, result: &SyncResult);

    /// `sync_data` was called with an entity type name it does not handle
    fn unknown_entity_type(&self, platform: &str, entity_type: &str);
}

/// Observer that emits structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn sync_started(&self, platform: &str, entity_type: EntityType, count: usize, dry_run: bool) {
        crate::log_sync_start!(platform, entity_type, count);
        if dry_run {
            tracing::info!(
                platform = platform,
                entity_type = %entity_type,
                "[DRY RUN] Records will not be written to the store"
            );
        }
    }

    fn sync_completed(&self, result: &SyncResult) {
        crate::log_sync_complete!(result);
    }

    fn unknown_entity_type(&self, platform: &str, entity_type: &str) {
        tracing::warn!(
            platform = platform,
            entity_type = entity_type,
            "Unknown entity type, nothing synced"
        );
    }
}
