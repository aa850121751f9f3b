//! Integration and run reports
//!
//! An [`IntegrationReport`] summarizes one façade's `sync_all`; a
//! [`RunReport`] collects the reports and failures of a CLI sync run.

use crate::core::sync::SyncResult;
use crate::domain::{EntityType, IntegrationKind, Platform};
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// Counts for one synced entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    /// Entity type
    pub entity_type: EntityType,
    /// Records synced
    pub records: usize,
    /// Records new to the store
    pub inserted: usize,
    /// Records whose payload changed
    pub updated: usize,
    /// Records already up to date
    pub unchanged: usize,
}

impl From<&SyncResult> for EntitySummary {
    fn from(result: &SyncResult) -> Self {
        Self {
            entity_type: result.entity_type,
            records: result.len(),
            inserted: result.inserted,
            updated: result.updated,
            unchanged: result.unchanged,
        }
    }
}

/// Summary of syncing every requested entity type of one integration
#[derive(Debug, Clone)]
pub struct IntegrationReport {
    /// Platform synced
    pub platform: Platform,

    /// ATS or HRIS
    pub kind: IntegrationKind,

    /// Whether the store was left untouched
    pub dry_run: bool,

    /// Per-entity counts, in sync order
    pub entities: Vec<EntitySummary>,

    /// Wall time of the sync
    pub duration: Duration,
}

impl IntegrationReport {
    /// Create an empty report
    pub fn new(platform: Platform, kind: IntegrationKind, dry_run: bool) -> Self {
        Self {
            platform,
            kind,
            dry_run,
            entities: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the result of one entity type
    pub fn add_result(&mut self, result: &SyncResult) {
        self.entities.push(EntitySummary::from(result));
    }

    /// Records synced across all entity types
    pub fn total_records(&self) -> usize {
        self.entities.iter().map(|e| e.records).sum()
    }

    /// Summary for one entity type, if it was synced
    pub fn entity(&self, entity_type: EntityType) -> Option<&EntitySummary> {
        self.entities.iter().find(|e| e.entity_type == entity_type)
    }
}

/// Integration that failed during a run
#[derive(Debug, Clone)]
pub struct IntegrationFailure {
    /// Configured integration name
    pub integration: String,

    /// Error message
    pub message: String,
}

/// Summary of a sync run over several integrations
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Unique id of this run, for correlating logs
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Reports of integrations that completed, keyed by integration name
    pub completed: Vec<(String, IntegrationReport)>,

    /// Integrations that failed
    pub failures: Vec<IntegrationFailure>,

    /// Integrations not started because of shutdown
    pub skipped: Vec<String>,

    /// Wall time of the run
    pub duration: Duration,
}

impl RunReport {
    /// Start a new run
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            completed: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a completed integration
    pub fn add_completed(&mut self, integration: impl Into<String>, report: IntegrationReport) {
        self.completed.push((integration.into(), report));
    }

    /// Record a failed integration
    pub fn add_failure(&mut self, integration: impl Into<String>, message: impl Into<String>) {
        self.failures.push(IntegrationFailure {
            integration: integration.into(),
            message: message.into(),
        });
    }

    /// Record an integration skipped due to shutdown
    pub fn add_skipped(&mut self, integration: impl Into<String>) {
        self.skipped.push(integration.into());
    }

    /// Whether every integration completed
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    /// Records synced across all completed integrations
    pub fn total_records(&self) -> usize {
        self.completed.iter().map(|(_, r)| r.total_records()).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            completed = self.completed.len(),
            failed = self.failures.len(),
            skipped = self.skipped.len(),
            total_records = self.total_records(),
            duration_ms = self.duration.as_millis() as u64,
            "Sync run completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                run_id = %self.run_id,
                integration = %failure.integration,
                error = %failure.message,
                "Integration failed"
            );
        }
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
