//! Greenhouse Harvest API client
//!
//! Base URL `https://harvest.greenhouse.io/v1`, basic auth with the API key as
//! username and an empty password. Collections are plain JSON arrays.

use super::http::{extract_items, AuthScheme, PlatformHttp};
use super::{check_credentials, require, PlatformClient};
use crate::config::{HttpConfig, PlatformCredentials};
use crate::domain::{FetchOptions, Platform, RawEntity, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;

const DEFAULT_BASE_URL: &str = "https://harvest.greenhouse.io/v1";

/// Greenhouse client
pub struct GreenhouseClient {
    http: PlatformHttp,
}

impl GreenhouseClient {
    /// Create a client from credentials (`api_key`)
    ///
    /// # Errors
    ///
    /// Returns a missing-credential error if `api_key` is absent.
    pub fn new(credentials: PlatformCredentials, http: &HttpConfig) -> Result<Self> {
        let platform = Platform::Greenhouse;
        check_credentials(&credentials, platform)?;

        let base_url = credentials
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = require(credentials.api_key, platform, "api_key")?;
        let auth = AuthScheme::Basic {
            username: api_key,
            password: String::new(),
        };

        Ok(Self {
            http: PlatformHttp::new(platform, base_url, auth, http)?,
        })
    }

    /// Harvest query parameters (`per_page`, `updated_after`, `job_id`)
    fn query(options: &FetchOptions, with_job: bool) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = options.limit {
            query.push(("per_page".to_string(), limit.to_string()));
        }
        if let Some(since) = options.updated_since {
            query.push((
                "updated_after".to_string(),
                since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if with_job {
            if let Some(ref job_id) = options.job_id {
                query.push(("job_id".to_string(), job_id.clone()));
            }
        }
        query.extend(options.extra_pairs());
        query
    }
}

#[async_trait]
impl PlatformClient for GreenhouseClient {
    fn platform(&self) -> Platform {
        Platform::Greenhouse
    }

    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn get_jobs(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/jobs", &Self::query(options, false))
            .await?;
        extract_items(body, &[])
    }

    async fn get_candidates(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/candidates", &Self::query(options, true))
            .await?;
        extract_items(body, &[])
    }

    async fn get_applications(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/applications", &Self::query(options, true))
            .await?;
        extract_items(body, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use chrono::{TimeZone, Utc};

    fn credentials() -> PlatformCredentials {
        PlatformCredentials {
            api_key: Some(secret_string("harvest".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_base_url() {
        let client = GreenhouseClient::new(credentials(), &HttpConfig::default()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_query_translation() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let options = FetchOptions::new()
            .with_limit(100)
            .with_updated_since(since)
            .with_job_id("55");

        let jobs_query = GreenhouseClient::query(&options, false);
        assert_eq!(
            jobs_query,
            vec![
                ("per_page".to_string(), "100".to_string()),
                ("updated_after".to_string(), "2024-05-01T12:00:00Z".to_string()),
            ]
        );

        let apps_query = GreenhouseClient::query(&options, true);
        assert!(apps_query.contains(&("job_id".to_string(), "55".to_string())));
    }
}
