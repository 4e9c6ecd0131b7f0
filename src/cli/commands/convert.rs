//! Convert command implementation
//!
//! This module implements the `convert` command: staged CSV records in the
//! source directory become paginated native XML files in the output directory.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_INVALID, EXIT_OK};
use crate::config::{load_config_or_default, FolioConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::FolioError;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Source directory holding the CSV files, covers and galleys
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory for the XML files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Username recorded as uploader of every submission file
    #[arg(short, long)]
    pub user: Option<String>,

    /// Number of issues per output file
    #[arg(long)]
    pub issues_per_file: Option<usize>,

    /// Path to the XSD the output is validated against
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Skip schema validation of the written files
    #[arg(long)]
    pub no_validate: bool,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting convert command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let coordinator = ExportCoordinator::from_config(config)?;

        println!("🚀 Starting conversion...");
        println!();

        let summary = match coordinator.execute_export() {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("Conversion failed: {e}");
                return Ok(match e {
                    FolioError::Configuration(_) => EXIT_CONFIG,
                    _ => EXIT_FATAL,
                });
            }
        };

        summary.log_summary();
        print_summary(&summary);

        if let Some(path) = &self.summary_json {
            if let Err(e) = summary.write_json(path) {
                tracing::error!(error = %e, path = %path.display(), "Failed to write summary");
                eprintln!("Failed to write summary to {}: {e}", path.display());
                return Ok(EXIT_FATAL);
            }
            println!("📝 Summary written to {}", path.display());
        }

        if !summary.is_valid() {
            println!("❌ Schema validation failed");
            return Ok(EXIT_INVALID);
        }

        println!("✅ Conversion completed successfully!");
        Ok(EXIT_OK)
    }

    /// Applies the command-line flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut FolioConfig) {
        if let Some(source) = &self.source {
            tracing::info!(source = %source.display(), "Overriding source directory from CLI");
            config.paths.source_dir = source.clone();
        }
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output directory from CLI");
            config.paths.output_dir = output.clone();
        }
        if let Some(user) = &self.user {
            config.journal.uploader = user.clone();
        }
        if let Some(per_file) = self.issues_per_file {
            config.export.issues_per_file = per_file;
        }
        if let Some(schema) = &self.schema {
            config.validation.schema_path = Some(schema.clone());
        }
        if self.no_validate {
            tracing::warn!("Schema validation disabled from CLI");
            config.validation.enabled = false;
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Conversion Summary:");
    println!("  Issues: {}", summary.issues_written());
    println!("  Articles: {}", summary.total_articles);
    println!("  Files: {}", summary.files.len());
    for file in &summary.files {
        println!(
            "    - {} ({} issues, {} articles)",
            file.path.display(),
            file.issues,
            file.articles
        );
    }
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);

    let diagnostics = &summary.diagnostics;
    if !diagnostics.skipped_assets.is_empty() {
        println!();
        println!("⚠️  Assets not embedded: {}", diagnostics.skipped_assets.len());
        for skipped in diagnostics.skipped_assets.iter().take(10) {
            println!(
                "    - {} {} ({})",
                skipped.kind.label(),
                skipped.path.display(),
                skipped.reason
            );
        }
        if diagnostics.skipped_assets.len() > 10 {
            println!("    ... and {} more", diagnostics.skipped_assets.len() - 10);
        }
    }
    if diagnostics.locale_warnings > 0 {
        println!(
            "⚠️  Secondary-language values without locale_2: {}",
            diagnostics.locale_warnings
        );
    }
    if diagnostics.articles_without_authors > 0 {
        println!(
            "⚠️  Articles without authors: {}",
            diagnostics.articles_without_authors
        );
    }

    if summary.validation_skipped {
        println!("⚠️  Schema validation skipped");
    }
    if let Some(report) = &summary.validation_report {
        println!();
        print!("{}", report.format_summary());
    }
    println!();
}
