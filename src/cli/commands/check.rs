//! Check command implementation
//!
//! Validates XML files written by an earlier run against the import schema.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_INVALID, EXIT_OK};
use crate::config::load_config_or_default;
use crate::core::verification::{resolve_schema_path, validate_files, XmllintValidator};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// XML files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to the XSD, overriding the configured schema
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Some(missing) = self.files.iter().find(|f| !f.is_file()) {
            tracing::error!(file = %missing.display(), "File to check not found");
            eprintln!("❌ File not found: {}", missing.display());
            return Ok(EXIT_FATAL);
        }

        let schema = match resolve_schema_path(self.schema.as_deref(), &config) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::error!(error = %e, "Schema not available");
                eprintln!("❌ {e}");
                return Ok(EXIT_FATAL);
            }
        };

        println!("🔍 Validating {} file(s) against {}", self.files.len(), schema.display());
        println!();

        let validator = XmllintValidator::from_config(&config);
        let report = match validate_files(&validator, &self.files, &schema) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Validation could not run");
                eprintln!("❌ Validation could not run: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print!("{}", report.format_summary());
        println!();

        if report.is_success() {
            println!("✅ All files are valid");
            Ok(EXIT_OK)
        } else {
            println!("❌ Schema validation failed");
            Ok(EXIT_INVALID)
        }
    }
}
