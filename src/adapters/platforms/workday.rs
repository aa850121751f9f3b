//! Workday Recruiting client
//!
//! Talks to `https://{tenant}.workday.com/ccx/api/v1` with a bearer token.
//! Job postings map to jobs and prospects map to candidates; Workday exposes
//! no application listing on this API.

use super::http::{extract_items, path_segment, AuthScheme, PlatformHttp};
use super::{check_credentials, require, PlatformClient};
use crate::config::{HttpConfig, PlatformCredentials};
use crate::domain::{FetchOptions, Platform, RawEntity, Result};
use async_trait::async_trait;

/// Workday collections wrap records in `{"total": n, "data": [...]}`
const ENVELOPE: &[&str] = &["/data"];

/// Workday client
pub struct WorkdayClient {
    http: PlatformHttp,
}

impl WorkdayClient {
    /// Create a client from credentials (`tenant`, `access_token`)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::MissingCredential` if a required field is absent,
    /// or a configuration error if the HTTP client cannot be built.
    pub fn new(credentials: PlatformCredentials, http: &HttpConfig) -> Result<Self> {
        let platform = Platform::Workday;
        check_credentials(&credentials, platform)?;

        let base_url = match credentials.base_url {
            Some(url) => url,
            None => {
                let tenant = require(credentials.tenant, platform, "tenant")?;
                format!("https://{tenant}.workday.com/ccx/api/v1")
            }
        };
        let token = require(credentials.access_token, platform, "access_token")?;

        Ok(Self {
            http: PlatformHttp::new(platform, base_url, AuthScheme::Bearer(token), http)?,
        })
    }

    /// Fetch a single prospect by id
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotFound`](crate::domain::PlatformError::NotFound)
    /// if the prospect does not exist, or a validation error for an empty id.
    pub async fn get_prospect(&self, id: &str) -> Result<RawEntity> {
        let path = format!("/prospects/{}", path_segment(id)?);
        let body = self.http.get_json(&path, &[]).await?;
        Ok(RawEntity::new(body))
    }

    fn query(options: &FetchOptions) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = options.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query.extend(options.extra_pairs());
        query
    }
}

#[async_trait]
impl PlatformClient for WorkdayClient {
    fn platform(&self) -> Platform {
        Platform::Workday
    }

    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn get_jobs(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/jobPostings", &Self::query(options))
            .await?;
        extract_items(body, ENVELOPE)
    }

    async fn get_candidates(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self
            .http
            .get_json("/prospects", &Self::query(options))
            .await?;
        extract_items(body, ENVELOPE)
    }
}
