//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! compiler configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::document::write_atomic;
use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dbmon.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing dbmon configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match write_atomic(&self.output, &Self::generate_config()) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your defaults", self.output);
                println!("  2. Validate an inventory: dbmon validate inventory.yml");
                println!("  3. Compile it: dbmon compile inventory.yml --output integrations.yml");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# dbmon Configuration File
# Compiles database inventories into infrastructure agent integrations

[application]
log_level = "info"       # trace | debug | info | warn | error
output_format = "yaml"   # yaml | json

# Global defaults, used when an inventory entry leaves a field unset
[defaults]
environment = "production"
mysql_port = 3306
postgres_port = 5432
interval = "30s"
timeout = "10s"
query_metrics_interval = "60s"
max_sql_query_length = 1000
query_response_time_threshold = 500
query_count_threshold = 20
custom_queries_dir = "/etc/newrelic-infra/integrations.d"

[logging]
local_enabled = false
local_path = "/var/log/dbmon"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
