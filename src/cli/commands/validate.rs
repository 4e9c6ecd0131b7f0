//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Folio configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying environment overrides
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Primary Locale: {}", config.journal.primary_locale);
        println!("  Uploader: {}", config.journal.uploader);
        println!("  Genre: {}", config.journal.genre_name);
        println!("  Source Directory: {}", config.paths.source_dir.display());
        println!("  Output Directory: {}", config.paths.output_dir.display());
        println!(
            "  Issue Covers: {}",
            config.paths.resolved_issue_cover_dir().display()
        );
        println!(
            "  Article Covers: {}",
            config.paths.resolved_article_cover_dir().display()
        );
        println!("  Galleys: {}", config.paths.resolved_galley_dir().display());
        println!("  Issues per File: {}", config.export.issues_per_file);
        println!("  ID Scheme: {}", config.export.id_scheme);
        println!("  Sections Block: {}", config.export.emit_sections);
        println!("  File Prefix: {}", config.export.file_prefix);
        println!("  Schema Validation: {}", config.validation.enabled);
        if let Some(schema) = &config.validation.schema_path {
            println!("  Schema: {}", schema.display());
        }
        println!();
        Ok(EXIT_OK)
    }
}
