//! Init command implementation
//!
//! Writes a sample `hirelink.toml`.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hirelink.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing hirelink configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and keep the integrations you use", self.output);
                println!("  2. Put platform secrets in a .env file, e.g.:");
                println!("     - GREENHOUSE_API_KEY");
                println!("     - WORKDAY_ACCESS_TOKEN");
                println!("     - BAMBOOHR_API_KEY");
                println!("     - SUCCESSFACTORS_ACCESS_TOKEN");
                println!("  3. Validate configuration: hirelink validate-config");
                println!("  4. Run a dry run: hirelink sync --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

fn sample_config() -> &'static str {
    r#"# hirelink configuration
# ATS/HRIS synchronization for Workday, BambooHR, Greenhouse and SAP SuccessFactors
#
# Values written as ${VAR} are read from the environment (or a .env file).
# Any setting can also be overridden with HIRELINK_<SECTION>_<KEY>.

environment = "development"  # development | staging | production

[application]
log_level = "info"  # trace | debug | info | warn | error
dry_run = false

[http]
timeout_seconds = 30
connect_timeout_seconds = 10
tls_verify = true

[http.retry]
# 1 = no retry. Higher values retry connection errors, timeouts, 429 and 5xx.
max_attempts = 1
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

[store]
kind = "json"  # memory | json
path = "./hirelink-data"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never

# ----------------------------------------------------------------------------
# ATS integrations
# ----------------------------------------------------------------------------

[[integrations]]
name = "greenhouse"
platform = "greenhouse"
entities = ["jobs", "candidates", "applications"]

[integrations.credentials]
api_key = "${GREENHOUSE_API_KEY}"

[integrations.options]
limit = 100

# [[integrations]]
# name = "workday"
# platform = "workday"
# entities = ["jobs", "candidates"]
#
# [integrations.credentials]
# tenant = "acme"
# access_token = "${WORKDAY_ACCESS_TOKEN}"

# [[integrations]]
# name = "bamboohr"
# platform = "bamboohr"
# entities = ["jobs", "applications"]
#
# [integrations.credentials]
# subdomain = "acme"
# api_key = "${BAMBOOHR_API_KEY}"
#
# [integrations.options]
# job_id = "17"  # BambooHR lists applications per job

# ----------------------------------------------------------------------------
# HRIS integrations
# ----------------------------------------------------------------------------

# [[integrations]]
# name = "successfactors"
# platform = "sap-successfactors"
#
# [integrations.credentials]
# api_url = "api4.successfactors.com"
# access_token = "${SUCCESSFACTORS_ACCESS_TOKEN}"
"#
}
