//! Sync command implementation
//!
//! Runs every configured integration (or a single named one) in order.
//! A failing integration is reported and the run moves on to the next one.

use crate::config::{load_config, IntegrationConfig};
use crate::core::integration::{Integration, IntegrationContext, RunReport};
use crate::core::sync::{create_store, TracingObserver};
use crate::domain::EntityType;
use clap::Args;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only sync the integration with this name
    #[arg(short, long)]
    pub integration: Option<String>,

    /// Override entity types to sync (comma-separated, e.g. jobs,candidates)
    #[arg(short, long)]
    pub entity: Option<String>,

    /// Dry run mode - fetch and map without writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        let dry_run = config.application.dry_run;

        let entity_override = match self.entity.as_deref().map(EntityType::parse_list) {
            Some(Ok(list)) => Some(list),
            Some(Err(e)) => {
                eprintln!("❌ Invalid --entity value: {e}");
                return Ok(2);
            }
            None => None,
        };

        let selected: Vec<&IntegrationConfig> = match &self.integration {
            Some(name) => match config.integration(name) {
                Some(integration) => vec![integration],
                None => {
                    eprintln!("❌ No integration named '{name}' in {config_path}");
                    return Ok(2);
                }
            },
            None => config.integrations.iter().collect(),
        };

        if selected.is_empty() {
            println!("⚠️  No integrations configured in {config_path}");
            return Ok(0);
        }

        let store = match create_store(&config.store).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open record store");
                eprintln!("❌ Failed to open record store: {e}");
                return Ok(5);
            }
        };

        if dry_run {
            println!("🔍 DRY RUN MODE - No records will be written to the store");
            println!();
        }

        let start = Instant::now();
        let mut run = RunReport::new();
        tracing::info!(run_id = %run.run_id, integrations = selected.len(), "Sync run started");

        for integration_config in selected {
            let name = integration_config.name.as_str();

            if *shutdown_signal.borrow() {
                tracing::info!(integration = name, "Shutdown requested, skipping integration");
                run.add_skipped(name);
                continue;
            }

            let entities = select_entities(integration_config, entity_override.as_deref());
            if entities.is_empty() {
                println!("⏭️  {name}: no matching entity types, skipped");
                continue;
            }

            let context = IntegrationContext {
                http: config.http.clone(),
                store: store.clone(),
                observer: Arc::new(TracingObserver),
                dry_run,
            };

            let integration = match Integration::from_config(integration_config, context) {
                Ok(i) => i,
                Err(e) => {
                    crate::log_error_with_context!(&e, name);
                    println!("❌ {name}: {e}");
                    run.add_failure(name, e.to_string());
                    continue;
                }
            };

            println!("🔄 Syncing {name} ({})...", integration.platform());

            match integration
                .sync_entities(&entities, &integration_config.options)
                .await
            {
                Ok(report) => {
                    for entity in &report.entities {
                        println!(
                            "   {}: {} records ({} new, {} updated, {} unchanged)",
                            entity.entity_type,
                            entity.records,
                            entity.inserted,
                            entity.updated,
                            entity.unchanged
                        );
                    }
                    println!("✅ {name} completed in {:.2}s", report.duration.as_secs_f64());
                    run.add_completed(name, report);
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, name);
                    println!("❌ {name} failed: {e}");
                    run.add_failure(name, e.to_string());
                }
            }
        }

        let run = run.with_duration(start.elapsed());
        run.log_summary();

        println!();
        println!("📊 Sync Summary:");
        println!("  Run ID: {}", run.run_id);
        println!("  Completed: {}", run.completed.len());
        println!("  Failed: {}", run.failures.len());
        println!("  Total Records: {}", run.total_records());
        println!("  Duration: {:.2}s", run.duration.as_secs_f64());
        println!();

        let exit_code = if !run.skipped.is_empty() {
            println!("⚠️  Sync interrupted, {} integration(s) not started", run.skipped.len());
            130
        } else if !run.failures.is_empty() {
            println!("⚠️  Sync completed with failures");
            1
        } else {
            println!("✅ Sync completed successfully!");
            0
        };

        Ok(exit_code)
    }
}

/// Entity types to sync for one integration
///
/// A command-line override is narrowed to what the platform exposes, so
/// `--entity candidates` across several platforms skips those without
/// candidates.
fn select_entities(
    integration: &IntegrationConfig,
    entity_override: Option<&[EntityType]>,
) -> Vec<EntityType> {
    let configured = integration.effective_entities();
    match entity_override {
        Some(requested) => requested
            .iter()
            .copied()
            .filter(|e| match integration.parsed_platform() {
                Ok(platform) => platform.supports(*e),
                Err(_) => configured.contains(e),
            })
            .collect(),
        None => configured,
    }
}
