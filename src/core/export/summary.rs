//! Conversion summary and reporting
//!
//! This module defines structures for tracking and reporting conversion results.

use crate::core::document::BuildDiagnostics;
use crate::core::verification::ValidationReport;
use crate::domain::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One output document written by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub issues: usize,
    pub articles: usize,
    /// Article IDs handed out in this file
    pub ids_issued: usize,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Output files in the order they were written
    pub files: Vec<WrittenFile>,

    /// Number of issues found in the staging data
    pub total_issues: usize,

    /// Number of articles written across all files
    pub total_articles: usize,

    /// Soft problems collected while building
    pub diagnostics: BuildDiagnostics,

    /// Duration of the run in milliseconds
    pub duration_ms: u64,

    /// Whether schema validation was skipped
    pub validation_skipped: bool,

    /// Validation report (if validation was run)
    pub validation_report: Option<ValidationReport>,
}

impl ExportSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            total_issues: 0,
            total_articles: 0,
            diagnostics: BuildDiagnostics::default(),
            duration_ms: 0,
            validation_skipped: false,
            validation_report: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Record a finished output file and its diagnostics
    pub fn add_file(&mut self, file: WrittenFile, diagnostics: BuildDiagnostics) {
        self.total_articles += file.articles;
        self.files.push(file);
        self.diagnostics.merge(diagnostics);
    }

    pub fn issues_written(&self) -> usize {
        self.files.iter().map(|f| f.issues).sum()
    }

    /// Name of the last file written, if any
    pub fn last_file(&self) -> Option<&Path> {
        self.files.last().map(|f| f.path.as_path())
    }

    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    /// Set the validation report
    pub fn set_validation_report(&mut self, report: ValidationReport) {
        self.validation_report = Some(report);
    }

    /// Check if every written file passed validation (or validation did not run)
    pub fn is_valid(&self) -> bool {
        self.validation_report
            .as_ref()
            .map_or(true, ValidationReport::is_success)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            files = self.files.len(),
            issues = self.issues_written(),
            articles = self.total_articles,
            skipped_assets = self.diagnostics.skipped_assets.len(),
            locale_warnings = self.diagnostics.locale_warnings,
            date_warnings = self.diagnostics.date_warnings,
            duration_ms = self.duration_ms,
            "Conversion completed"
        );

        for skipped in &self.diagnostics.skipped_assets {
            tracing::warn!(
                kind = skipped.kind.label(),
                path = %skipped.path.display(),
                issue = %skipped.issue,
                reason = %skipped.reason,
                "Asset not embedded"
            );
        }

        if self.validation_skipped {
            tracing::warn!("Schema validation was skipped");
        }
        if let Some(report) = &self.validation_report {
            tracing::info!(
                valid = report.passed(),
                invalid = report.failed(),
                "Schema validation finished"
            );
        }
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}
