//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  HTTP Timeout: {}s", config.http.timeout_seconds);
        println!("  Retry Attempts: {}", config.http.retry.max_attempts);
        println!("  Store: {:?} ({})", config.store.kind, config.store.path);
        println!("  Integrations: {}", config.integrations.len());

        for integration in &config.integrations {
            let entities: Vec<String> = integration
                .effective_entities()
                .iter()
                .map(|e| e.to_string())
                .collect();
            let kind = integration
                .kind()
                .map(|k| k.to_string())
                .unwrap_or_default();

            println!(
                "    - {} [{} {}]: {}",
                integration.name,
                kind,
                integration.platform,
                entities.join(", ")
            );
        }
        println!();

        Ok(0)
    }
}
