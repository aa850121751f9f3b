//! Fetch filters passed to platform clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional filters for a platform fetch
///
/// Each client translates these into its own query parameters; filters a
/// platform has no equivalent for are ignored by that client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Restrict to one job (required by BambooHR applications)
    #[serde(default)]
    pub job_id: Option<String>,

    /// Only records modified at or after this instant
    #[serde(default)]
    pub updated_since: Option<DateTime<Utc>>,

    /// Page size hint
    #[serde(default)]
    pub limit: Option<u32>,

    /// Extra query parameters appended verbatim
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl FetchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the job filter
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Set the modified-since filter
    pub fn with_updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }

    /// Set the page size hint
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add an extra query parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Extra parameters as query pairs
    pub fn extra_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let options = FetchOptions::new()
            .with_job_id("42")
            .with_updated_since(since)
            .with_limit(50)
            .with_param("status", "open");

        assert_eq!(options.job_id.as_deref(), Some("42"));
        assert_eq!(options.updated_since, Some(since));
        assert_eq!(options.limit, Some(50));
        assert_eq!(
            options.extra_pairs(),
            vec![("status".to_string(), "open".to_string())]
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let options: FetchOptions = toml::from_str(
            r#"
job_id = "17"
updated_since = "2024-03-01T00:00:00Z"

[params]
status = "active"
"#,
        )
        .unwrap();

        assert_eq!(options.job_id.as_deref(), Some("17"));
        assert!(options.updated_since.is_some());
        assert_eq!(options.limit, None);
        assert_eq!(options.params.get("status").map(String::as_str), Some("active"));
    }
}
