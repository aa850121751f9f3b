//! BambooHR applicant tracking client
//!
//! Base URL `https://api.bamboohr.com/api/gateway.php/{subdomain}/v1`, HTTP
//! basic auth with the API key as username and `x` as password.
//! Applications are listed per job, so `get_applications` needs
//! `FetchOptions::job_id`.

use super::http::{extract_items, path_segment, AuthScheme, PlatformHttp};
use super::{check_credentials, require, PlatformClient};
use crate::config::{HttpConfig, PlatformCredentials};
use crate::domain::{FetchOptions, HireLinkError, Platform, RawEntity, Result};
use async_trait::async_trait;
use serde_json::Value;

/// BambooHR wraps application lists in `{"paginationComplete": .., "applications": [...]}`
const APPLICATIONS_ENVELOPE: &[&str] = &["/applications"];

/// BambooHR client
pub struct BambooHrClient {
    http: PlatformHttp,
}

impl BambooHrClient {
    /// Create a client from credentials (`subdomain`, `api_key`)
    ///
    /// # Errors
    ///
    /// Returns a missing-credential error if a required field is absent.
    pub fn new(credentials: PlatformCredentials, http: &HttpConfig) -> Result<Self> {
        let platform = Platform::BambooHr;
        check_credentials(&credentials, platform)?;

        let base_url = match credentials.base_url {
            Some(url) => url,
            None => {
                let subdomain = require(credentials.subdomain, platform, "subdomain")?;
                format!("https://api.bamboohr.com/api/gateway.php/{subdomain}/v1")
            }
        };
        let api_key = require(credentials.api_key, platform, "api_key")?;
        let auth = AuthScheme::Basic {
            username: api_key,
            password: "x".to_string(),
        };

        Ok(Self {
            http: PlatformHttp::new(platform, base_url, auth, http)?,
        })
    }

    /// Submit a candidate application to a job
    ///
    /// # Errors
    ///
    /// Returns an error if BambooHR rejects the application.
    pub async fn add_candidate(&self, job_id: &str, candidate: &Value) -> Result<RawEntity> {
        let path = format!("/jobs/{}/applications", path_segment(job_id)?);
        let body = self.http.post_json(&path, candidate).await?;
        tracing::info!(job_id = %job_id, "Submitted candidate application to BambooHR");
        Ok(RawEntity::new(body))
    }
}

#[async_trait]
impl PlatformClient for BambooHrClient {
    fn platform(&self) -> Platform {
        Platform::BambooHr
    }

    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn get_jobs(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/jobs/summary", &options.extra_pairs())
            .await?;
        extract_items(body, &[])
    }

    async fn get_applications(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let job_id = options.job_id.as_deref().ok_or_else(|| {
            HireLinkError::Validation(
                "BambooHR lists applications per job; set options.job_id".to_string(),
            )
        })?;

        let path = format!("/jobs/{}/applications", path_segment(job_id)?);
        let body = self.http.get_json(&path, &options.extra_pairs()).await?;
        extract_items(body, APPLICATIONS_ENVELOPE)
    }
}
