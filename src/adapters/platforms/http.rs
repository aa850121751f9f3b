//! Shared HTTP plumbing for platform clients
//!
//! Every platform client owns a [`PlatformHttp`], which carries the base URL,
//! the authorization scheme and the retry policy, and maps HTTP status codes
//! onto [`PlatformError`] variants.

use crate::config::{HttpConfig, RetryConfig, SecretString};
use crate::domain::{HireLinkError, Platform, PlatformError, RawEntity, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// How requests to a platform are authorized
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer(SecretString),
    /// `Authorization: Basic base64(username:password)`
    Basic {
        /// Basic auth username (the API key for BambooHR and Greenhouse)
        username: SecretString,
        /// Basic auth password
        password: String,
    },
}

impl AuthScheme {
    fn header_value(&self) -> String {
        match self {
            AuthScheme::Bearer(token) => format!("Bearer {}", token.expose_secret()),
            AuthScheme::Basic { username, password } => {
                let credentials = format!("{}:{}", username.expose_secret(), password);
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                format!("Basic {encoded}")
            }
        }
    }
}

/// Authenticated JSON-over-HTTP access to one platform
pub struct PlatformHttp {
    platform: Platform,
    base_url: String,
    client: Client,
    auth: AuthScheme,
    retry: RetryConfig,
}

impl PlatformHttp {
    /// Build the HTTP client for a platform
    ///
    /// # Errors
    ///
    /// Returns [`HireLinkError::Configuration`] if the underlying client
    /// cannot be constructed (e.g. TLS backend initialization fails).
    pub fn new(
        platform: Platform,
        base_url: impl Into<String>,
        auth: AuthScheme,
        config: &HttpConfig,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone());

        if !config.tls_verify {
            tracing::warn!(platform = %platform, "TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            HireLinkError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            platform,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            auth,
            retry: config.retry.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue an authenticated GET and decode the JSON body
    ///
    /// Transient failures are retried according to the retry policy.
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);

        tracing::debug!(
            platform = %self.platform,
            url = %url,
            params = query.len(),
            "GET"
        );

        self.retry_request(|| async {
            let resp = self
                .client
                .get(&url)
                .query(query)
                .header(AUTHORIZATION, self.auth.header_value())
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(map_send_error)?;

            read_json(resp, &url).await
        })
        .await
    }

    /// Issue an authenticated POST with a JSON body
    ///
    /// POSTs are never retried.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);

        tracing::debug!(platform = %self.platform, url = %url, "POST");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .header(AUTHORIZATION, self.auth.header_value())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_send_error)?;

        read_json(resp, &url).await
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < max_attempts && e.is_retryable() => {
                    let delay_ms = retry_delay_ms(&self.retry, attempt, &e);

                    tracing::warn!(
                        platform = %self.platform,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

async fn read_json(resp: Response, url: &str) -> Result<Value> {
    let status = resp.status();

    if status.is_success() {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PlatformError::InvalidResponse(format!("{url}: {e}")))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(&bytes)
            .map_err(|e| PlatformError::InvalidResponse(format!("{url}: {e}")).into());
    }

    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await.unwrap_or_default();

    Err(status_error(status, url, body, retry_after).into())
}

fn status_error(
    status: StatusCode,
    url: &str,
    body: String,
    retry_after: Option<String>,
) -> PlatformError {
    match status.as_u16() {
        401 | 403 => PlatformError::AuthenticationFailed(format!("{status} from {url}")),
        404 => PlatformError::NotFound(url.to_string()),
        429 => PlatformError::RateLimitExceeded(
            retry_after.unwrap_or_else(|| "unspecified".to_string()),
        ),
        code if code >= 500 => PlatformError::ServerError {
            status: code,
            message: body,
        },
        code => PlatformError::ClientError {
            status: code,
            message: body,
        },
    }
}

/// Delay before the next attempt
///
/// A rate limit whose Retry-After is a number of seconds waits that long,
/// capped at `max_delay_ms`. Anything else uses the configured backoff.
fn retry_delay_ms(retry: &RetryConfig, attempt: usize, err: &HireLinkError) -> u64 {
    match err {
        HireLinkError::Platform(PlatformError::RateLimitExceeded(retry_after)) => retry_after
            .trim()
            .parse::<u64>()
            .map(|secs| secs.saturating_mul(1000).min(retry.max_delay_ms))
            .unwrap_or_else(|_| retry.delay_ms(attempt)),
        _ => retry.delay_ms(attempt),
    }
}

/// Percent-encode a caller-supplied id for use as one URL path segment
///
/// # Errors
///
/// Returns a validation error for ids that are empty or a dot segment.
pub fn path_segment(value: &str) -> Result<String> {
    if matches!(value, "" | "." | "..") {
        return Err(HireLinkError::Validation(format!(
            "'{value}' is not a valid id in a request path"
        )));
    }

    let mut url = url::Url::parse("http://segment.invalid/")
        .map_err(|e| HireLinkError::Other(format!("Failed to build path segment: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| HireLinkError::Other("Failed to build path segment".to_string()))?
        .clear()
        .push(value);

    Ok(url.path().trim_start_matches('/').to_string())
}

fn map_send_error(e: reqwest::Error) -> HireLinkError {
    if e.is_timeout() {
        PlatformError::Timeout(e.to_string()).into()
    } else {
        PlatformError::ConnectionFailed(e.to_string()).into()
    }
}

/// Split a decoded response body into individual records
///
/// Arrays are taken as-is. Objects are searched for the first JSON pointer in
/// `envelope` that resolves to an array; an object without such an array is a
/// single record. `null` yields no records.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidResponse`] for scalar bodies.
pub fn extract_items(body: Value, envelope: &[&str]) -> Result<Vec<RawEntity>> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.into_iter().map(RawEntity::new).collect()),
        Value::Object(map) => {
            let mut object = Value::Object(map);
            for pointer in envelope {
                if let Some(Value::Array(items)) = object.pointer_mut(pointer) {
                    return Ok(std::mem::take(items)
                        .into_iter()
                        .map(RawEntity::new)
                        .collect());
                }
            }
            Ok(vec![RawEntity::new(object)])
        }
        other => Err(PlatformError::InvalidResponse(format!(
            "expected a JSON array or object, got: {other}"
        ))
        .into()),
    }
}
