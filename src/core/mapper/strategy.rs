//! Per-platform mapping strategies

use crate::domain::EntityType;
use serde_json::Value;

/// Platform-specific mapping rules
///
/// Both hooks have defaults: the identifier is read from `id` and the payload
/// is kept unchanged. Platforms override only what differs.
pub trait MappingStrategy: Send + Sync {
    /// Fields holding the record identifier, tried in order
    fn source_id_fields(&self, _entity_type: EntityType) -> &'static [&'static str] {
        &["id"]
    }

    /// Reshape a raw payload into canonical form
    fn transform(&self, _entity_type: EntityType, data: Value) -> Value {
        data
    }
}

/// Workday job postings and prospects
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkdayStrategy;

impl MappingStrategy for WorkdayStrategy {}

/// BambooHR job summaries and applications
#[derive(Debug, Clone, Copy, Default)]
pub struct BambooHrStrategy;

impl MappingStrategy for BambooHrStrategy {}

/// Greenhouse Harvest records
#[derive(Debug, Clone, Copy, Default)]
pub struct GreenhouseStrategy;

impl MappingStrategy for GreenhouseStrategy {}

/// SuccessFactors OData `User` records
#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessFactorsStrategy;

impl MappingStrategy for SuccessFactorsStrategy {
    fn source_id_fields(&self, entity_type: EntityType) -> &'static [&'static str] {
        match entity_type {
            EntityType::Employees => &["userId", "id"],
            _ => &["id"],
        }
    }
}

/// Fallback for platforms without mapping rules
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughStrategy;

impl MappingStrategy for PassThroughStrategy {}
