//! SAP SuccessFactors OData v2 client
//!
//! Base URL `https://{api_url}/odata/v2` with a bearer token. Employees come
//! from the `User` entity set, wrapped in the OData `{"d": {"results": [...]}}`
//! envelope.

use super::http::{extract_items, AuthScheme, PlatformHttp};
use super::{check_credentials, require, PlatformClient};
use crate::config::{HttpConfig, PlatformCredentials};
use crate::domain::{FetchOptions, Platform, RawEntity, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;

const ENVELOPE: &[&str] = &["/d/results", "/value"];

/// SAP SuccessFactors client
pub struct SuccessFactorsClient {
    http: PlatformHttp,
}

impl SuccessFactorsClient {
    /// Create a client from credentials (`api_url`, `access_token`)
    ///
    /// # Errors
    ///
    /// Returns a missing-credential error if a required field is absent.
    pub fn new(credentials: PlatformCredentials, http: &HttpConfig) -> Result<Self> {
        let platform = Platform::SapSuccessFactors;
        check_credentials(&credentials, platform)?;

        let base_url = match credentials.base_url {
            Some(url) => url,
            None => {
                let api_url = require(credentials.api_url, platform, "api_url")?;
                let host = api_url
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/');
                format!("https://{host}/odata/v2")
            }
        };
        let token = require(credentials.access_token, platform, "access_token")?;

        Ok(Self {
            http: PlatformHttp::new(platform, base_url, AuthScheme::Bearer(token), http)?,
        })
    }

    /// OData system query options
    fn query(options: &FetchOptions) -> Vec<(String, String)> {
        let mut query = vec![("$format".to_string(), "json".to_string())];
        if let Some(limit) = options.limit {
            query.push(("$top".to_string(), limit.to_string()));
        }
        if let Some(since) = options.updated_since {
            query.push((
                "$filter".to_string(),
                format!(
                    "lastModifiedDateTime ge datetimeoffset'{}'",
                    since.to_rfc3339_opts(SecondsFormat::Secs, true)
                ),
            ));
        }
        query.extend(options.extra_pairs());
        query
    }
}

#[async_trait]
impl PlatformClient for SuccessFactorsClient {
    fn platform(&self) -> Platform {
        Platform::SapSuccessFactors
    }

    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn get_employees(&self, options: &FetchOptions) -> Result<Vec<RawEntity>> {
        let body = self.http.get_json("/User", &Self::query(options)).await?;
        extract_items(body, ENVELOPE)
    }
}
