//! Core business logic for hirelink.
//!
//! # Modules
//!
//! - [`mapper`] - Platform payload to canonical entity mapping
//! - [`sync`] - Sync engine, record stores and observers
//! - [`integration`] - ATS/HRIS façades wiring client, mapper and engine
//! - [`bulk`] - Bulk import and export of records through files
//!
//! # Sync Workflow
//!
//! 1. **Fetch**: The platform client issues one authenticated GET
//! 2. **Map**: The data mapper turns raw records into canonical entities
//! 3. **Sync**: The sync engine upserts them into the record store
//! 4. **Report**: The façade returns the engine's result
//!
//! # Example
//!
//! ```rust,no_run
//! use hirelink::config::{secret_string, PlatformCredentials};
//! use hirelink::core::integration::HrisIntegration;
//! use hirelink::domain::FetchOptions;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = PlatformCredentials {
//!     api_url: Some("api4.successfactors.com".to_string()),
//!     access_token: Some(secret_string("token".to_string())),
//!     ..Default::default()
//! };
//!
//! let hris = HrisIntegration::new("sap-successfactors", credentials)?;
//! let report = hris.sync_all(&FetchOptions::default()).await?;
//!
//! println!("Synced {} records", report.total_records());
//! # Ok(())
//! # }
//! ```

pub mod bulk;
pub mod integration;
pub mod mapper;
pub mod sync;
