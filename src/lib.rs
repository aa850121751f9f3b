// hirelink - ATS/HRIS platform synchronization
// Copyright (c) 2025 hirelink Contributors
// Licensed under the MIT License

//! # hirelink - ATS/HRIS platform sync
//!
//! hirelink pulls recruiting and HR records from Workday, BambooHR,
//! Greenhouse and SAP SuccessFactors, maps them to a canonical shape and
//! writes them to a deduplicating record store.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mapping, sync engine, integrations, bulk files)
//! - [`adapters`] - Platform HTTP clients
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! Every sync runs the same pipeline: a platform client fetches raw records,
//! the [`core::mapper::DataMapper`] turns them into canonical entities and the
//! [`core::sync::SyncEngine`] upserts them into a [`core::sync::RecordStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hirelink::config::{secret_string, PlatformCredentials};
//! use hirelink::core::integration::AtsIntegration;
//! use hirelink::domain::FetchOptions;
//!
//! # async fn example() -> hirelink::domain::Result<()> {
//! let credentials = PlatformCredentials {
//!     api_key: Some(secret_string("harvest-key".to_string())),
//!     ..Default::default()
//! };
//!
//! let greenhouse = AtsIntegration::new("greenhouse", credentials)?;
//! let jobs = greenhouse.sync_jobs(&FetchOptions::new().with_limit(50)).await?;
//!
//! println!("Synced {} jobs ({} new)", jobs.len(), jobs.inserted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error type is
//! [`domain::HireLinkError`]. Platform failures carry a
//! [`domain::PlatformError`] with the HTTP status when one was received.
//!
//! ## Logging
//!
//! Sync progress is reported through a [`core::sync::SyncObserver`]; the
//! default [`core::sync::TracingObserver`] emits `tracing` events:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(platform = "greenhouse", "Starting sync");
//! warn!(entity_type = "offers", "Unknown entity type");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
