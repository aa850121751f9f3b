//! Data mapping from platform payloads to canonical entities
//!
//! A [`DataMapper`] is bound to one platform and delegates to that platform's
//! [`MappingStrategy`]. Strategies decide where the source identifier lives
//! and how the payload is reshaped; today every strategy keeps the payload
//! as-is, so canonical data equals raw data.
//!
//! # Example
//!
//! ```
//! use hirelink::core::mapper::DataMapper;
//! use hirelink::domain::{Platform, RawEntity};
//! use serde_json::json;
//!
//! let mapper = DataMapper::new(Platform::Greenhouse);
//! let jobs = mapper.map_jobs(vec![RawEntity::new(json!({"id": 42, "name": "Engineer"}))]);
//!
//! assert_eq!(jobs[0].source_id.as_deref(), Some("42"));
//! ```

mod strategy;

pub use strategy::{
    BambooHrStrategy, GreenhouseStrategy, MappingStrategy, PassThroughStrategy,
    SuccessFactorsStrategy, WorkdayStrategy,
};

use crate::domain::{CanonicalEntity, EntityType, Platform, RawEntity};
use std::str::FromStr;
use std::sync::Arc;

/// Maps raw platform records to canonical entities
#[derive(Clone)]
pub struct DataMapper {
    platform: String,
    strategy: Arc<dyn MappingStrategy>,
}

impl DataMapper {
    /// Create a mapper for a known platform
    pub fn new(platform: Platform) -> Self {
        let strategy: Arc<dyn MappingStrategy> = match platform {
            Platform::Workday => Arc::new(WorkdayStrategy),
            Platform::BambooHr => Arc::new(BambooHrStrategy),
            Platform::Greenhouse => Arc::new(GreenhouseStrategy),
            Platform::SapSuccessFactors => Arc::new(SuccessFactorsStrategy),
        };

        Self {
            platform: platform.to_string(),
            strategy,
        }
    }

    /// Create a mapper from a platform name
    ///
    /// Unknown names get the pass-through strategy and are recorded under the
    /// name as given.
    pub fn for_name(name: &str) -> Self {
        match Platform::from_str(name) {
            Ok(platform) => Self::new(platform),
            Err(_) => {
                tracing::debug!(platform = name, "No mapping strategy, passing records through");
                Self::with_strategy(name, Arc::new(PassThroughStrategy))
            }
        }
    }

    /// Create a mapper with a custom strategy
    pub fn with_strategy(platform: impl Into<String>, strategy: Arc<dyn MappingStrategy>) -> Self {
        Self {
            platform: platform.into(),
            strategy,
        }
    }

    /// Platform name stamped on mapped entities
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Map job records
    pub fn map_jobs(&self, raws: Vec<RawEntity>) -> Vec<CanonicalEntity> {
        self.map(EntityType::Jobs, raws)
    }

    /// Map candidate records
    pub fn map_candidates(&self, raws: Vec<RawEntity>) -> Vec<CanonicalEntity> {
        self.map(EntityType::Candidates, raws)
    }

    /// Map application records
    pub fn map_applications(&self, raws: Vec<RawEntity>) -> Vec<CanonicalEntity> {
        self.map(EntityType::Applications, raws)
    }

    /// Map employee records
    pub fn map_employees(&self, raws: Vec<RawEntity>) -> Vec<CanonicalEntity> {
        self.map(EntityType::Employees, raws)
    }

    /// Map records of any entity type
    ///
    /// Output has the same length and order as the input.
    pub fn map(&self, entity_type: EntityType, raws: Vec<RawEntity>) -> Vec<CanonicalEntity> {
        let id_fields = self.strategy.source_id_fields(entity_type);

        raws.into_iter()
            .map(|raw| {
                let source_id = id_fields.iter().find_map(|field| raw.field_as_id(field));
                let data = self.strategy.transform(entity_type, raw.into_inner());
                CanonicalEntity::new(self.platform.clone(), entity_type, source_id, data)
            })
            .collect()
    }
}

impl std::fmt::Debug for DataMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataMapper")
            .field("platform", &self.platform)
            .finish()
    }
}
