//! External system integrations for hirelink.
//!
//! - [`platforms`] - ATS/HRIS REST clients (Workday, BambooHR, Greenhouse,
//!   SAP SuccessFactors) behind the [`platforms::PlatformClient`] trait
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies so the sync pipeline can be tested
//! against stub clients. Platform selection goes through
//! [`platforms::create_client`]:
//!
//! ```rust,no_run
//! use hirelink::adapters::platforms::{create_client, PlatformClient};
//! use hirelink::config::{secret_string, HttpConfig, PlatformCredentials};
//! use hirelink::domain::{FetchOptions, Platform};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = PlatformCredentials {
//!     subdomain: Some("acme".to_string()),
//!     api_key: Some(secret_string("bamboo-key".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = create_client(Platform::BambooHr, credentials, &HttpConfig::default())?;
//! let jobs = client.get_jobs(&FetchOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod platforms;
