//! Export command implementation
//!
//! Writes the stored canonical records of one platform and entity type to a
//! JSON file.

use crate::config::{load_config, StoreKind};
use crate::core::bulk::BulkOperations;
use crate::core::sync::create_store;
use crate::domain::EntityType;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Platform whose records to export
    #[arg(short, long)]
    pub platform: String,

    /// Entity type to export
    #[arg(short, long)]
    pub entity: EntityType,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if config.store.kind == StoreKind::Memory {
            println!(
                "⚠️  store.kind is 'memory'; nothing persists between runs, \
                 so the export will be empty"
            );
        }

        let store = create_store(&config.store).await?;
        let bulk = BulkOperations::new(store);

        match bulk
            .export_file(&self.platform, self.entity, &self.output)
            .await
        {
            Ok(count) => {
                println!(
                    "✅ Exported {count} {} records to {}",
                    self.entity,
                    self.output.display()
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                println!("❌ Export failed: {e}");
                Ok(1)
            }
        }
    }
}
