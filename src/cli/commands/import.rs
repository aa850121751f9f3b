//! Import command implementation
//!
//! Loads a JSON file of raw platform records into the configured store.

use crate::config::load_config;
use crate::core::bulk::BulkOperations;
use crate::core::sync::create_store;
use crate::domain::EntityType;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Platform the records come from (selects the mapping rules)
    #[arg(short, long)]
    pub platform: String,

    /// Entity type of the records
    #[arg(short, long)]
    pub entity: EntityType,

    /// JSON file with an array of records, or an object wrapping one
    #[arg(short, long)]
    pub file: PathBuf,

    /// Map and classify records without writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            platform = %self.platform,
            entity_type = %self.entity,
            file = %self.file.display(),
            "Starting import"
        );

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        let dry_run = self.dry_run || config.application.dry_run;

        let store = create_store(&config.store).await?;
        let bulk = BulkOperations::new(store).with_dry_run(dry_run);

        if dry_run {
            println!("🔍 DRY RUN MODE - No records will be written to the store");
        }
        println!("📥 Importing {} from {}", self.entity, self.file.display());

        match bulk
            .import_file(&self.platform, self.entity, &self.file)
            .await
        {
            Ok(result) => {
                println!(
                    "✅ Imported {} records ({} new, {} updated, {} unchanged)",
                    result.len(),
                    result.inserted,
                    result.updated,
                    result.unchanged
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                println!("❌ Import failed: {e}");
                Ok(1)
            }
        }
    }
}
