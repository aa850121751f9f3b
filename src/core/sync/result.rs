//! Sync results

use super::store::UpsertOutcome;
use crate::domain::{CanonicalEntity, EntityType};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of syncing one batch of entities
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    /// Platform the records came from
    pub platform: String,

    /// Entity type that was synced
    pub entity_type: EntityType,

    /// The synced records, in input order
    pub records: Vec<CanonicalEntity>,

    /// Records new to the store
    pub inserted: usize,

    /// Records whose stored payload changed
    pub updated: usize,

    /// Records already stored with the same payload
    pub unchanged: usize,

    /// Whether the store was left untouched
    pub dry_run: bool,

    /// When the sync finished
    pub synced_at: DateTime<Utc>,
}

impl SyncResult {
    pub(crate) fn new(
        platform: impl Into<String>,
        entity_type: EntityType,
        records: Vec<CanonicalEntity>,
        outcome: UpsertOutcome,
        dry_run: bool,
    ) -> Self {
        Self {
            platform: platform.into(),
            entity_type,
            records,
            inserted: outcome.inserted,
            updated: outcome.updated,
            unchanged: outcome.unchanged,
            dry_run,
            synced_at: Utc::now(),
        }
    }

    /// Number of records synced
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were synced
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
